// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This module exports the trait representing the interface of a governance token

use crate::error::TokenError;
use crate::event::EmittedEvent;
use crate::event_store::EventFilter;
use crate::types::{CallContext, Checkpoint};
use hmove_hash::Hash;
use hmove_models::{Address, Amount, BlockNumber};
use hmove_signature::Signature;
use hmove_time::HMoveTime;

/// Interface of a governance token.
///
/// State-changing calls either fully apply or fail without any effect.
pub trait TokenController: Send + Sync {
    /// Move `amount` from the caller to `to`
    fn transfer(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to` using the allowance granted by `from` to the caller
    fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Set the allowance of `spender` over the caller's funds
    fn approve(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Raise the allowance of `spender` by `added`
    fn increase_allowance(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        added: Amount,
    ) -> Result<(), TokenError>;

    /// Lower the allowance of `spender` by `subtracted`
    fn decrease_allowance(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        subtracted: Amount,
    ) -> Result<(), TokenError>;

    /// Create `amount` tokens for `to`. Owner only.
    fn mint(&mut self, ctx: &CallContext, to: Address, amount: Amount) -> Result<(), TokenError>;

    /// Destroy `amount` tokens held by `from`. Owner only.
    fn burn(&mut self, ctx: &CallContext, from: Address, amount: Amount) -> Result<(), TokenError>;

    /// Make `delegatee` the delegatee of the caller, none to stop delegating
    fn delegate(&mut self, ctx: &CallContext, delegatee: Option<Address>) -> Result<(), TokenError>;

    /// Delegate on behalf of the signer of a `Delegation` payload
    fn delegate_by_sig(
        &mut self,
        ctx: &CallContext,
        delegatee: Option<Address>,
        nonce: u64,
        expiry: HMoveTime,
        signature: &Signature,
    ) -> Result<(), TokenError>;

    /// Approve on behalf of `owner` with a signed `Permit` payload
    fn permit(
        &mut self,
        ctx: &CallContext,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: HMoveTime,
        signature: &Signature,
    ) -> Result<(), TokenError>;

    /// Stop transfers. Owner only.
    fn pause(&mut self, ctx: &CallContext) -> Result<(), TokenError>;

    /// Resume transfers. Owner only.
    fn unpause(&mut self, ctx: &CallContext) -> Result<(), TokenError>;

    /// Hand ownership over to `new_owner`. Owner only.
    fn transfer_ownership(
        &mut self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), TokenError>;

    /// Leave the token without owner, for good. Owner only.
    fn renounce_ownership(&mut self, ctx: &CallContext) -> Result<(), TokenError>;

    /// display name
    fn name(&self) -> &str;

    /// ticker
    fn symbol(&self) -> &str;

    /// number of fractional digits, always 18
    fn decimals(&self) -> u8;

    /// sum of all balances
    fn total_supply(&self) -> Amount;

    /// balance of `account`
    fn balance_of(&self, account: &Address) -> Amount;

    /// amount `spender` may still spend on behalf of `owner`
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// current delegatee of `account`
    fn delegates(&self, account: &Address) -> Option<Address>;

    /// current voting power of `account`
    fn get_votes(&self, account: &Address) -> Amount;

    /// voting power of `account` at the end of `block`.
    /// Fails with `SequencePointNotFinalized` unless `block < current_block`.
    fn get_past_votes(
        &self,
        account: &Address,
        block: BlockNumber,
        current_block: BlockNumber,
    ) -> Result<Amount, TokenError>;

    /// total supply at the end of `block`, same finalization rule as `get_past_votes`
    fn get_past_total_supply(
        &self,
        block: BlockNumber,
        current_block: BlockNumber,
    ) -> Result<Amount, TokenError>;

    /// number of checkpoints of `account`
    fn num_checkpoints(&self, account: &Address) -> usize;

    /// checkpoint `index` of `account`
    fn checkpoints(&self, account: &Address, index: usize) -> Option<Checkpoint>;

    /// next authorization nonce of `account`
    fn nonces(&self, account: &Address) -> u64;

    /// current owner, none once renounced
    fn owner(&self) -> Option<Address>;

    /// true while transfers are paused
    fn paused(&self) -> bool;

    /// separator of the signing domain
    fn domain_separator(&self) -> Hash;

    /// Get events optionally filtered by:
    /// * start block
    /// * end block
    /// * involved address
    fn get_filtered_events(&self, filter: &EventFilter) -> Vec<EmittedEvent>;
}
