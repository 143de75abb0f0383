// Copyright (c) 2022 MASSA LABS <info@massa.net>

use hmove_models::{Address, Amount, BlockNumber};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Log entry produced by a successful call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TokenEvent {
    /// tokens moved; `from` is none on mint, `to` is none on burn
    Transfer {
        /// debited account
        from: Option<Address>,
        /// credited account
        to: Option<Address>,
        /// moved amount
        amount: Amount,
    },
    /// allowance set
    Approval {
        /// owner of the funds
        owner: Address,
        /// spender
        spender: Address,
        /// new allowance
        amount: Amount,
    },
    /// delegatee of an account changed
    DelegateChanged {
        /// delegating account
        delegator: Address,
        /// previous delegatee
        from_delegatee: Option<Address>,
        /// new delegatee
        to_delegatee: Option<Address>,
    },
    /// voting power of a delegatee changed
    DelegateVotesChanged {
        /// delegatee
        account: Address,
        /// votes before the change
        previous_votes: Amount,
        /// votes after the change
        new_votes: Amount,
    },
    /// owner changed; `new_owner` is none after renouncement
    OwnershipTransferred {
        /// previous owner
        previous_owner: Option<Address>,
        /// new owner
        new_owner: Option<Address>,
    },
    /// transfers paused
    Paused {
        /// account that paused
        account: Address,
    },
    /// transfers resumed
    Unpaused {
        /// account that unpaused
        account: Address,
    },
}

impl TokenEvent {
    /// event name as it appears in logs
    pub fn name(&self) -> &'static str {
        match self {
            TokenEvent::Transfer { .. } => "Transfer",
            TokenEvent::Approval { .. } => "Approval",
            TokenEvent::DelegateChanged { .. } => "DelegateChanged",
            TokenEvent::DelegateVotesChanged { .. } => "DelegateVotesChanged",
            TokenEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            TokenEvent::Paused { .. } => "Paused",
            TokenEvent::Unpaused { .. } => "Unpaused",
        }
    }

    /// true if `address` appears in any field of the event
    pub fn involves(&self, address: &Address) -> bool {
        let is = |candidate: &Option<Address>| candidate.as_ref() == Some(address);
        match self {
            TokenEvent::Transfer { from, to, .. } => is(from) || is(to),
            TokenEvent::Approval { owner, spender, .. } => owner == address || spender == address,
            TokenEvent::DelegateChanged {
                delegator,
                from_delegatee,
                to_delegatee,
            } => delegator == address || is(from_delegatee) || is(to_delegatee),
            TokenEvent::DelegateVotesChanged { account, .. } => account == address,
            TokenEvent::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => is(previous_owner) || is(new_owner),
            TokenEvent::Paused { account } | TokenEvent::Unpaused { account } => {
                account == address
            }
        }
    }
}

/// Position of an event in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    /// block of the call that emitted the event
    pub block: BlockNumber,
    /// index of the event among the events of that block
    pub index_in_block: u64,
}

/// Event with its log position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedEvent {
    /// where the event was logged
    pub context: EventContext,
    /// the event itself
    pub event: TokenEvent,
}

impl Display for EmittedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Block {} event {}: {}",
            self.context.block,
            self.context.index_in_block,
            self.event.name()
        )?;
        match &self.event {
            TokenEvent::Transfer { from, to, amount } => {
                write!(
                    f,
                    "{} -> {}: {}",
                    display_opt(from),
                    display_opt(to),
                    amount
                )
            }
            TokenEvent::Approval {
                owner,
                spender,
                amount,
            } => write!(f, "{} allows {}: {}", owner, spender, amount),
            TokenEvent::DelegateChanged {
                delegator,
                from_delegatee,
                to_delegatee,
            } => write!(
                f,
                "{}: {} -> {}",
                delegator,
                display_opt(from_delegatee),
                display_opt(to_delegatee)
            ),
            TokenEvent::DelegateVotesChanged {
                account,
                previous_votes,
                new_votes,
            } => write!(f, "{}: {} -> {}", account, previous_votes, new_votes),
            TokenEvent::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => write!(
                f,
                "{} -> {}",
                display_opt(previous_owner),
                display_opt(new_owner)
            ),
            TokenEvent::Paused { account } | TokenEvent::Unpaused { account } => {
                write!(f, "by {}", account)
            }
        }
    }
}

fn display_opt(address: &Option<Address>) -> String {
    match address {
        Some(address) => address.to_string(),
        None => "none".to_string(),
    }
}
