// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! The governance token: ledger, vote checkpoints, delegation, signed
//! authorizations and access control behind `TokenController`.
//!
//! Every state-changing call checks all its preconditions before its first
//! write, so a rejected call leaves the state untouched and logs no event.
//! Calls must come in non-decreasing block order.

use crate::access::AccessController;
use crate::authorization::{AuthorizationVerifier, Secp256k1Recovery};
use crate::checkpoints::{check_finalized, CheckpointHistory};
use crate::delegation::DelegationEngine;
use crate::ledger::Ledger;
use hmove_hash::Hash;
use hmove_logging::hmove_trace;
use hmove_models::{Address, Amount, BlockNumber};
use hmove_signature::Signature;
use hmove_time::HMoveTime;
use hmove_token_exports::typed_data::Eip712Domain;
use hmove_token_exports::{
    CallContext, Checkpoint, EmittedEvent, EventFilter, EventStore, SignerRecovery, TokenConfig,
    TokenController, TokenError, TokenEvent, TOKEN_DECIMALS,
};
use tracing::{debug, warn};

/// Everything a failed call must leave untouched
#[derive(Debug)]
pub(crate) struct TokenState {
    pub ledger: Ledger,
    pub delegation: DelegationEngine,
    pub total_supply_history: CheckpointHistory,
    pub authorization: AuthorizationVerifier,
    pub access: AccessController,
    /// block of the last applied call
    pub last_block: BlockNumber,
}

impl TokenState {
    /// Move tokens and keep vote and supply checkpoints in sync.
    /// A missing `from` mints, a missing `to` burns.
    fn move_tokens(
        &mut self,
        from: Option<Address>,
        to: Option<Address>,
        amount: Amount,
        block: BlockNumber,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        let votes_move = self.delegation.plan_balance_change(from, to, amount)?;
        self.ledger.transfer_coins(from, to, amount)?;
        if from.is_none() || to.is_none() {
            self.total_supply_history
                .write(self.ledger.total_supply(), block);
        }
        let mut events = vec![TokenEvent::Transfer { from, to, amount }];
        events.extend(self.delegation.apply(votes_move, block));
        Ok(events)
    }

    fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        check_spender(&spender)?;
        self.ledger.set_allowance(owner, spender, amount);
        Ok(vec![TokenEvent::Approval {
            owner,
            spender,
            amount,
        }])
    }

    fn delegate(
        &mut self,
        delegator: Address,
        delegatee: Option<Address>,
        block: BlockNumber,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        check_delegatee(&delegatee)?;
        let balance = self.ledger.balance_of(&delegator);
        self.delegation
            .delegate(delegator, delegatee, balance, block)
    }
}

fn check_spender(spender: &Address) -> Result<(), TokenError> {
    if spender.is_zero() {
        return Err(TokenError::ZeroAddress("spender"));
    }
    Ok(())
}

fn check_delegatee(delegatee: &Option<Address>) -> Result<(), TokenError> {
    if delegatee.map_or(false, |delegatee| delegatee.is_zero()) {
        return Err(TokenError::ZeroAddress("delegatee"));
    }
    Ok(())
}

/// Governance token driven by sequential calls
pub struct GovernanceToken {
    config: TokenConfig,
    state: TokenState,
    events: EventStore,
    recovery: Box<dyn SignerRecovery>,
}

impl std::fmt::Debug for GovernanceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceToken")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("events", &self.events.len())
            .finish()
    }
}

impl GovernanceToken {
    /// Deploy a token owned by `deployer`, verifying signatures with secp256k1 recovery
    pub fn deploy(
        config: TokenConfig,
        deployer: Address,
        block: BlockNumber,
    ) -> Result<Self, TokenError> {
        Self::deploy_with_recovery(config, deployer, block, Box::new(Secp256k1Recovery))
    }

    /// Deploy a token owned by `deployer` and mint the configured initial supply to it
    pub fn deploy_with_recovery(
        config: TokenConfig,
        deployer: Address,
        block: BlockNumber,
        recovery: Box<dyn SignerRecovery>,
    ) -> Result<Self, TokenError> {
        if deployer.is_zero() {
            return Err(TokenError::ZeroAddress("deployer"));
        }
        if config.contract_address.is_zero() {
            return Err(TokenError::ConfigError("contract address cannot be zero".to_string()));
        }
        let domain = Eip712Domain::new(
            &config.eip712_name,
            config.chain_id,
            config.contract_address,
        );
        let state = TokenState {
            ledger: Ledger::default(),
            delegation: DelegationEngine::default(),
            total_supply_history: CheckpointHistory::default(),
            authorization: AuthorizationVerifier::new(&domain)?,
            access: AccessController::new(deployer),
            last_block: block,
        };
        let mut token = GovernanceToken {
            config,
            state,
            events: EventStore::default(),
            recovery,
        };

        let initial_supply = token.config.initial_supply;
        let ctx = CallContext::new(deployer, block, HMoveTime::default());
        token.execute(&ctx, "deploy", |state, _| {
            let mut events = vec![TokenEvent::OwnershipTransferred {
                previous_owner: None,
                new_owner: Some(deployer),
            }];
            if !initial_supply.is_zero() {
                let minted = state.move_tokens(None, Some(deployer), initial_supply, block)?;
                events.extend(minted);
            }
            Ok(events)
        })?;
        debug!(
            "deployed token {} ({}) owned by {}",
            token.config.name, token.config.symbol, deployer
        );
        Ok(token)
    }

    /// configuration the token was deployed with
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Run `operation` against the state and log its events.
    /// `f` must not write anything before its last fallible step.
    fn execute<F>(
        &mut self,
        ctx: &CallContext,
        operation: &'static str,
        f: F,
    ) -> Result<(), TokenError>
    where
        F: FnOnce(&mut TokenState, &dyn SignerRecovery) -> Result<Vec<TokenEvent>, TokenError>,
    {
        let result = if ctx.block < self.state.last_block {
            Err(TokenError::StaleSequencePoint {
                block: ctx.block,
                latest: self.state.last_block,
            })
        } else {
            f(&mut self.state, self.recovery.as_ref())
        };
        match result {
            Ok(events) => {
                self.state.last_block = ctx.block;
                debug!(
                    "{} by {} at block {} applied ({} events)",
                    operation,
                    ctx.caller,
                    ctx.block,
                    events.len()
                );
                for event in events {
                    let emitted = self.events.push(ctx.block, event);
                    hmove_trace!("token.event", {
                        "block": emitted.context.block,
                        "index_in_block": emitted.context.index_in_block,
                        "event": emitted.event,
                    });
                }
                Ok(())
            }
            Err(err) => {
                warn!(
                    "{} by {} at block {} rejected: {}",
                    operation, ctx.caller, ctx.block, err
                );
                Err(err)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &TokenState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn events(&self) -> &EventStore {
        &self.events
    }
}

impl TokenController for GovernanceToken {
    fn transfer(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "transfer", |state, _| {
            state.access.when_not_paused()?;
            if to.is_zero() {
                return Err(TokenError::ZeroAddress("recipient"));
            }
            state.move_tokens(Some(ctx.caller), Some(to), amount, ctx.block)
        })
    }

    fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "transfer_from", |state, _| {
            state.access.when_not_paused()?;
            if to.is_zero() {
                return Err(TokenError::ZeroAddress("recipient"));
            }
            let remaining = state
                .ledger
                .allowance_after_spend(from, ctx.caller, amount)?;
            let events = state.move_tokens(Some(from), Some(to), amount, ctx.block)?;
            if let Some(remaining) = remaining {
                state.ledger.set_allowance(from, ctx.caller, remaining);
            }
            Ok(events)
        })
    }

    fn approve(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "approve", |state, _| {
            state.approve(ctx.caller, spender, amount)
        })
    }

    fn increase_allowance(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        added: Amount,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "increase_allowance", |state, _| {
            let allowance = state
                .ledger
                .allowance(&ctx.caller, &spender)
                .checked_add(added)
                .ok_or(TokenError::AmountOverflow)?;
            state.approve(ctx.caller, spender, allowance)
        })
    }

    fn decrease_allowance(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        subtracted: Amount,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "decrease_allowance", |state, _| {
            let current = state.ledger.allowance(&ctx.caller, &spender);
            let allowance =
                current
                    .checked_sub(subtracted)
                    .ok_or(TokenError::InsufficientAllowance {
                        owner: ctx.caller,
                        spender,
                        allowance: current,
                        requested: subtracted,
                    })?;
            state.approve(ctx.caller, spender, allowance)
        })
    }

    fn mint(&mut self, ctx: &CallContext, to: Address, amount: Amount) -> Result<(), TokenError> {
        // not gated by the pause flag
        self.execute(ctx, "mint", |state, _| {
            state.access.only_owner(&ctx.caller)?;
            if to.is_zero() {
                return Err(TokenError::ZeroAddress("recipient"));
            }
            state.move_tokens(None, Some(to), amount, ctx.block)
        })
    }

    fn burn(&mut self, ctx: &CallContext, from: Address, amount: Amount) -> Result<(), TokenError> {
        // not gated by the pause flag
        self.execute(ctx, "burn", |state, _| {
            state.access.only_owner(&ctx.caller)?;
            if from.is_zero() {
                return Err(TokenError::ZeroAddress("burned account"));
            }
            state.move_tokens(Some(from), None, amount, ctx.block)
        })
    }

    fn delegate(
        &mut self,
        ctx: &CallContext,
        delegatee: Option<Address>,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "delegate", |state, _| {
            state.delegate(ctx.caller, delegatee, ctx.block)
        })
    }

    fn delegate_by_sig(
        &mut self,
        ctx: &CallContext,
        delegatee: Option<Address>,
        nonce: u64,
        expiry: HMoveTime,
        signature: &Signature,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "delegate_by_sig", |state, recovery| {
            check_delegatee(&delegatee)?;
            let authorized = state.authorization.verify_delegation(
                recovery,
                ctx.timestamp,
                delegatee,
                nonce,
                expiry,
                signature,
            )?;
            let events = state.delegate(authorized.signer, delegatee, ctx.block)?;
            state.authorization.consume(authorized);
            Ok(events)
        })
    }

    fn permit(
        &mut self,
        ctx: &CallContext,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: HMoveTime,
        signature: &Signature,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "permit", |state, recovery| {
            check_spender(&spender)?;
            let authorized = state.authorization.verify_permit(
                recovery,
                ctx.timestamp,
                owner,
                spender,
                value,
                deadline,
                signature,
            )?;
            let events = state.approve(owner, spender, value)?;
            state.authorization.consume(authorized);
            Ok(events)
        })
    }

    fn pause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        self.execute(ctx, "pause", |state, _| {
            Ok(vec![state.access.pause(&ctx.caller)?])
        })
    }

    fn unpause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        self.execute(ctx, "unpause", |state, _| {
            Ok(vec![state.access.unpause(&ctx.caller)?])
        })
    }

    fn transfer_ownership(
        &mut self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        self.execute(ctx, "transfer_ownership", |state, _| {
            let event = state.access.transfer_ownership(&ctx.caller, new_owner)?;
            Ok(vec![event])
        })
    }

    fn renounce_ownership(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        self.execute(ctx, "renounce_ownership", |state, _| {
            Ok(vec![state.access.renounce_ownership(&ctx.caller)?])
        })
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn symbol(&self) -> &str {
        &self.config.symbol
    }

    fn decimals(&self) -> u8 {
        TOKEN_DECIMALS
    }

    fn total_supply(&self) -> Amount {
        self.state.ledger.total_supply()
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.state.ledger.balance_of(account)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.state.ledger.allowance(owner, spender)
    }

    fn delegates(&self, account: &Address) -> Option<Address> {
        self.state.delegation.delegates(account)
    }

    fn get_votes(&self, account: &Address) -> Amount {
        self.state.delegation.votes().latest(account)
    }

    fn get_past_votes(
        &self,
        account: &Address,
        block: BlockNumber,
        current_block: BlockNumber,
    ) -> Result<Amount, TokenError> {
        self.state
            .delegation
            .votes()
            .votes_at(account, block, current_block)
    }

    fn get_past_total_supply(
        &self,
        block: BlockNumber,
        current_block: BlockNumber,
    ) -> Result<Amount, TokenError> {
        check_finalized(block, current_block)?;
        Ok(self.state.total_supply_history.at(block))
    }

    fn num_checkpoints(&self, account: &Address) -> usize {
        self.state.delegation.votes().len(account)
    }

    fn checkpoints(&self, account: &Address, index: usize) -> Option<Checkpoint> {
        self.state.delegation.votes().get(account, index)
    }

    fn nonces(&self, account: &Address) -> u64 {
        self.state.authorization.nonce(account)
    }

    fn owner(&self) -> Option<Address> {
        self.state.access.owner()
    }

    fn paused(&self) -> bool {
        self.state.access.paused()
    }

    fn domain_separator(&self) -> Hash {
        self.state.authorization.domain_separator()
    }

    fn get_filtered_events(&self, filter: &EventFilter) -> Vec<EmittedEvent> {
        self.events.get_filtered(filter)
    }
}
