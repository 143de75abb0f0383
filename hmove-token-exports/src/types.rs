// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Plain data types shared between the token controller and its callers

use hmove_models::{Address, Amount, BlockNumber};
use hmove_time::HMoveTime;
use serde::{Deserialize, Serialize};

/// Recorded voting power of an account starting at a given block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// block at which this value took effect
    pub from_block: BlockNumber,
    /// voting power from that block on
    pub votes: Amount,
}

/// Environment inputs of a single state-changing call.
/// They are fixed for the whole duration of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// identity of the caller
    pub caller: Address,
    /// current block number
    pub block: BlockNumber,
    /// current block timestamp
    pub timestamp: HMoveTime,
}

impl CallContext {
    /// Creates a call context
    pub fn new(caller: Address, block: BlockNumber, timestamp: HMoveTime) -> Self {
        CallContext {
            caller,
            block,
            timestamp,
        }
    }
}
