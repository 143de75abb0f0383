// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Block-indexed history of voting power

use hmove_models::{Address, Amount, BlockNumber};
use hmove_token_exports::{Checkpoint, TokenError};
use std::collections::BTreeMap;

/// Fails unless `block` is strictly before `current`
pub(crate) fn check_finalized(block: BlockNumber, current: BlockNumber) -> Result<(), TokenError> {
    if block >= current {
        return Err(TokenError::SequencePointNotFinalized { block, current });
    }
    Ok(())
}

/// Checkpoints ordered by strictly increasing block.
/// Only the last entry is ever modified.
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckpointHistory(Vec<Checkpoint>);

impl CheckpointHistory {
    /// Record `votes` at `block`, updating the last entry if it is at the same block.
    /// `block` never precedes the last entry: the token rejects out of order calls.
    pub fn write(&mut self, votes: Amount, block: BlockNumber) {
        debug_assert!(self.0.last().map_or(true, |last| last.from_block <= block));
        match self.0.last_mut() {
            Some(last) if last.from_block == block => last.votes = votes,
            _ => self.0.push(Checkpoint {
                from_block: block,
                votes,
            }),
        }
    }

    pub fn latest(&self) -> Amount {
        self.0.last().map(|c| c.votes).unwrap_or_default()
    }

    /// Value in effect at `block`, zero before the first checkpoint
    pub fn at(&self, block: BlockNumber) -> Amount {
        let upper = self.0.partition_point(|c| c.from_block <= block);
        match upper.checked_sub(1) {
            Some(index) => self.0[index].votes,
            None => Amount::zero(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<Checkpoint> {
        self.0.get(index).copied()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.0.iter()
    }
}

/// Per-account checkpoint histories
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckpointStore(BTreeMap<Address, CheckpointHistory>);

impl CheckpointStore {
    pub fn write(&mut self, account: Address, votes: Amount, block: BlockNumber) {
        self.0.entry(account).or_default().write(votes, block);
    }

    pub fn latest(&self, account: &Address) -> Amount {
        self.0
            .get(account)
            .map(CheckpointHistory::latest)
            .unwrap_or_default()
    }

    pub fn votes_at(
        &self,
        account: &Address,
        block: BlockNumber,
        current: BlockNumber,
    ) -> Result<Amount, TokenError> {
        check_finalized(block, current)?;
        Ok(self
            .0
            .get(account)
            .map(|history| history.at(block))
            .unwrap_or_default())
    }

    pub fn len(&self, account: &Address) -> usize {
        self.0.get(account).map(CheckpointHistory::len).unwrap_or(0)
    }

    pub fn get(&self, account: &Address, index: usize) -> Option<Checkpoint> {
        self.0.get(account).and_then(|history| history.get(index))
    }

    #[cfg(test)]
    pub fn history(&self, account: &Address) -> Option<&CheckpointHistory> {
        self.0.get(account)
    }
}
