// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Delegatee bookkeeping and voting power moves

use crate::checkpoints::CheckpointStore;
use hmove_models::{Address, Amount, BlockNumber};
use hmove_token_exports::{TokenError, TokenEvent};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub(crate) struct DelegationEngine {
    delegates: BTreeMap<Address, Address>,
    votes: CheckpointStore,
}

/// Vote changes computed ahead of any write, as `(account, previous, new)` legs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VotesMove(Vec<(Address, Amount, Amount)>);

impl DelegationEngine {
    pub fn delegates(&self, account: &Address) -> Option<Address> {
        self.delegates.get(account).copied()
    }

    pub fn votes(&self) -> &CheckpointStore {
        &self.votes
    }

    /// Replace the delegatee of `delegator` and move its `balance` of votes along
    pub fn delegate(
        &mut self,
        delegator: Address,
        delegatee: Option<Address>,
        balance: Amount,
        block: BlockNumber,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        let previous = self.delegates(&delegator);
        let votes_move = self.plan_move(previous, delegatee, balance)?;
        match delegatee {
            Some(delegatee) => self.delegates.insert(delegator, delegatee),
            None => self.delegates.remove(&delegator),
        };
        let mut events = vec![TokenEvent::DelegateChanged {
            delegator,
            from_delegatee: previous,
            to_delegatee: delegatee,
        }];
        events.extend(self.apply(votes_move, block));
        Ok(events)
    }

    /// Votes to move between the delegatees of two holders exchanging `amount`
    pub fn plan_balance_change(
        &self,
        from: Option<Address>,
        to: Option<Address>,
        amount: Amount,
    ) -> Result<VotesMove, TokenError> {
        let from_delegatee = from.and_then(|from| self.delegates(&from));
        let to_delegatee = to.and_then(|to| self.delegates(&to));
        self.plan_move(from_delegatee, to_delegatee, amount)
    }

    /// Write both legs of a planned move at `block`
    pub fn apply(&mut self, votes_move: VotesMove, block: BlockNumber) -> Vec<TokenEvent> {
        votes_move
            .0
            .into_iter()
            .map(|(account, previous_votes, new_votes)| {
                self.votes.write(account, new_votes, block);
                TokenEvent::DelegateVotesChanged {
                    account,
                    previous_votes,
                    new_votes,
                }
            })
            .collect()
    }

    fn plan_move(
        &self,
        from: Option<Address>,
        to: Option<Address>,
        amount: Amount,
    ) -> Result<VotesMove, TokenError> {
        if from == to || amount.is_zero() {
            return Ok(VotesMove::default());
        }
        let mut legs = Vec::with_capacity(2);
        if let Some(account) = from {
            let previous_votes = self.votes.latest(&account);
            let new_votes = previous_votes
                .checked_sub(amount)
                .ok_or(TokenError::AmountOverflow)?;
            legs.push((account, previous_votes, new_votes));
        }
        if let Some(account) = to {
            let previous_votes = self.votes.latest(&account);
            let new_votes = previous_votes
                .checked_add(amount)
                .ok_or(TokenError::AmountOverflow)?;
            legs.push((account, previous_votes, new_votes));
        }
        Ok(VotesMove(legs))
    }
}
