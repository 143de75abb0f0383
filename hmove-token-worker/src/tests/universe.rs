// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{GovernanceToken, Secp256k1Recovery};
use hmove_models::{Address, Amount};
use hmove_signature::Signature;
use hmove_test_framework::{TestAccount, TestChain, TestUniverse};
use hmove_time::HMoveTime;
use hmove_token_exports::typed_data::{Delegation, Permit};
use hmove_token_exports::{
    CallContext, SignerRecovery, TokenConfig, TokenController, TokenError,
};
use std::str::FromStr;

pub const TEST_CHAIN_ID: u64 = 31337;

/// `n` whole tokens
pub fn tokens(n: &str) -> Amount {
    Amount::from_str(n).unwrap()
}

pub fn test_contract_address() -> Address {
    Address::from_str("0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap()
}

pub struct TokenForeignControllers {
    pub recovery: Box<dyn SignerRecovery>,
}

impl TokenForeignControllers {
    pub fn new_with_secp256k1() -> Self {
        Self {
            recovery: Box::new(Secp256k1Recovery),
        }
    }

    pub fn new_with_recovery(recovery: Box<dyn SignerRecovery>) -> Self {
        Self { recovery }
    }
}

pub struct TokenTestUniverse {
    pub module_controller: GovernanceToken,
    pub chain: TestChain,
    /// deployer and owner
    pub owner: TestAccount,
    pub signer1: TestAccount,
    pub signer2: TestAccount,
    pub signer3: TestAccount,
}

impl TestUniverse for TokenTestUniverse {
    type ModuleController = GovernanceToken;
    type ForeignControllers = TokenForeignControllers;
    type Config = TokenConfig;

    fn new(controllers: Self::ForeignControllers, config: Self::Config) -> Self {
        let mut chain = TestChain::default();
        let owner = TestAccount::new(0);
        chain.mine();
        let module_controller = GovernanceToken::deploy_with_recovery(
            config,
            owner.address,
            chain.block(),
            controllers.recovery,
        )
        .unwrap();
        let universe = Self {
            module_controller,
            chain,
            owner,
            signer1: TestAccount::new(1),
            signer2: TestAccount::new(2),
            signer3: TestAccount::new(3),
        };
        universe.initialize();
        universe
    }

    fn get_module_controller(&self) -> &Self::ModuleController {
        &self.module_controller
    }

    fn get_module_controller_mut(&mut self) -> &mut Self::ModuleController {
        &mut self.module_controller
    }
}

impl TokenTestUniverse {
    pub fn hyper_move() -> Self {
        Self::new(
            TokenForeignControllers::new_with_secp256k1(),
            TokenConfig::hyper_move(TEST_CHAIN_ID, test_contract_address()),
        )
    }

    pub fn hyper_burn() -> Self {
        Self::new(
            TokenForeignControllers::new_with_secp256k1(),
            TokenConfig::hyper_burn(TEST_CHAIN_ID, test_contract_address()),
        )
    }

    /// Mine a block for a call of `caller`
    pub fn ctx(&mut self, caller: &Address) -> CallContext {
        self.chain.call_context(caller)
    }

    /// Deadline fifteen minutes after the latest block
    pub fn deadline(&self) -> HMoveTime {
        self.chain
            .timestamp()
            .saturating_add(HMoveTime::from_secs(15 * 60))
    }

    /// Sign a permit with `signer`, using the current nonce of `owner`
    pub fn sign_permit(
        &self,
        signer: &TestAccount,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: HMoveTime,
    ) -> Signature {
        let permit = Permit {
            owner,
            spender,
            value,
            nonce: self.module_controller.nonces(&owner),
            deadline,
        };
        signer.sign_typed_data(&self.module_controller.domain_separator(), &permit)
    }

    /// Sign a delegation with `signer` using its current nonce, returning the nonce too
    pub fn sign_delegation(
        &self,
        signer: &TestAccount,
        delegatee: Option<Address>,
        expiry: HMoveTime,
    ) -> (u64, Signature) {
        let nonce = self.module_controller.nonces(&signer.address);
        let delegation = Delegation {
            delegatee,
            nonce,
            expiry,
        };
        (
            nonce,
            signer.sign_typed_data(&self.module_controller.domain_separator(), &delegation),
        )
    }

    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let ctx = self.ctx(from);
        self.module_controller.transfer(&ctx, *to, amount)
    }

    pub fn delegate(&mut self, from: &Address, to: Option<Address>) -> Result<(), TokenError> {
        let ctx = self.ctx(from);
        self.module_controller.delegate(&ctx, to)
    }

    pub fn mint(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let ctx = self.ctx(caller);
        self.module_controller.mint(&ctx, *to, amount)
    }

    pub fn burn(
        &mut self,
        caller: &Address,
        from: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let ctx = self.ctx(caller);
        self.module_controller.burn(&ctx, *from, amount)
    }
}
