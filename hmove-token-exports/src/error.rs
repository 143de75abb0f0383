// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! this file defines all possible token error categories

use displaydoc::Display;
use hmove_models::{Address, Amount, BlockNumber, ModelsError};
use hmove_serialization::SerializeError;
use hmove_time::HMoveTime;
use thiserror::Error;

/// Errors of the token component.
///
/// Every rejected call reports exactly one of these and leaves the token state untouched.
#[non_exhaustive]
#[derive(Clone, Display, Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// insufficient balance: {account} holds {balance}, {requested} requested
    InsufficientBalance {
        /// debited account
        account: Address,
        /// its balance
        balance: Amount,
        /// requested amount
        requested: Amount,
    },

    /// insufficient allowance: {spender} may spend {allowance} of {owner}, {requested} requested
    InsufficientAllowance {
        /// owner of the funds
        owner: Address,
        /// spender
        spender: Address,
        /// current allowance
        allowance: Amount,
        /// requested amount
        requested: Amount,
    },

    /// {caller} is not the owner
    Unauthorized {
        /// rejected caller
        caller: Address,
    },

    /// transfers are paused
    Paused,

    /// the pause flag is already set to {paused}
    AlreadyInState {
        /// current value of the pause flag
        paused: bool,
    },

    /// permit deadline {deadline} is before current time {now}
    ExpiredDeadline {
        /// signed deadline
        deadline: HMoveTime,
        /// call timestamp
        now: HMoveTime,
    },

    /// delegation expiry {expiry} is before current time {now}
    ExpiredSignature {
        /// signed expiry
        expiry: HMoveTime,
        /// call timestamp
        now: HMoveTime,
    },

    /// invalid signature: {0}
    InvalidSignature(String),

    /// invalid nonce for {account}: expected {expected}, got {got}
    InvalidNonce {
        /// signer
        account: Address,
        /// stored nonce
        expected: u64,
        /// signed nonce
        got: u64,
    },

    /// block {block} is not finalized yet (current block is {current})
    SequencePointNotFinalized {
        /// queried block
        block: BlockNumber,
        /// current block
        current: BlockNumber,
    },

    /// call at block {block} comes after a call at block {latest}
    StaleSequencePoint {
        /// block of the rejected call
        block: BlockNumber,
        /// block of the last applied call
        latest: BlockNumber,
    },

    /// the zero address cannot be used as {0}
    ZeroAddress(&'static str),

    /// amount overflow
    AmountOverflow,

    /// configuration error: {0}
    ConfigError(String),

    /// typed data encoding error: {0}
    SerializeError(String),
}

impl From<ModelsError> for TokenError {
    fn from(value: ModelsError) -> Self {
        match value {
            ModelsError::ConfigError(msg) => TokenError::ConfigError(msg),
            other => TokenError::ConfigError(other.to_string()),
        }
    }
}

impl From<SerializeError> for TokenError {
    fn from(value: SerializeError) -> Self {
        TokenError::SerializeError(value.to_string())
    }
}
