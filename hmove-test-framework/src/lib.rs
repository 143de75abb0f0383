use hmove_hash::Hash;
use hmove_models::{Address, BlockNumber};
use hmove_signature::{KeyPair, Signature};
use hmove_time::HMoveTime;
use hmove_token_exports::typed_data::{typed_data_digest, TypedData};
use hmove_token_exports::CallContext;
use tracing_subscriber::filter::LevelFilter;

/// Seconds between two mined blocks
pub const BLOCK_TIME_SECS: u64 = 1;

pub trait TestUniverse {
    type ModuleController;
    type ForeignControllers;
    type Config;

    fn new(controllers: Self::ForeignControllers, config: Self::Config) -> Self;

    fn initialize(&self) {
        use tracing_subscriber::prelude::*;
        let tracing_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_filter(LevelFilter::DEBUG);
        // several universes can live in the same test binary
        let _ = tracing_subscriber::registry()
            .with(tracing_layer)
            .try_init();
    }

    fn get_module_controller(&self) -> &Self::ModuleController;
    fn get_module_controller_mut(&mut self) -> &mut Self::ModuleController;
}

/// Test account with a deterministic key
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub keypair: KeyPair,
    pub address: Address,
}

impl TestAccount {
    /// The `index`-th test account, always the same key for the same index
    pub fn new(index: u64) -> Self {
        let secret = Hash::compute_from_parts(&[&b"hmove test account"[..], &index.to_be_bytes()]);
        let keypair = KeyPair::from_bytes(secret.to_bytes()).unwrap();
        let address = Address::from_public_key(&keypair.get_public_key());
        TestAccount { keypair, address }
    }

    /// Sign a typed payload under `domain_separator`
    pub fn sign_typed_data<T: TypedData>(&self, domain_separator: &Hash, payload: &T) -> Signature {
        sign_typed_data(&self.keypair, domain_separator, payload)
    }
}

/// Sign a typed payload under `domain_separator`
pub fn sign_typed_data<T: TypedData>(
    keypair: &KeyPair,
    domain_separator: &Hash,
    payload: &T,
) -> Signature {
    let digest = typed_data_digest(domain_separator, &payload.struct_hash().unwrap());
    keypair.sign(&digest)
}

/// Simulated host chain: every call is mined in its own block
#[derive(Debug, Clone)]
pub struct TestChain {
    block: BlockNumber,
    timestamp: HMoveTime,
}

impl TestChain {
    pub fn new(block: BlockNumber, timestamp: HMoveTime) -> Self {
        TestChain { block, timestamp }
    }

    /// latest mined block
    pub fn block(&self) -> BlockNumber {
        self.block
    }

    /// timestamp of the latest mined block
    pub fn timestamp(&self) -> HMoveTime {
        self.timestamp
    }

    /// Mine one empty block
    pub fn mine(&mut self) {
        self.block += 1;
        self.timestamp = self
            .timestamp
            .saturating_add(HMoveTime::from_secs(BLOCK_TIME_SECS));
    }

    pub fn advance_blocks(&mut self, count: u64) {
        for _ in 0..count {
            self.mine();
        }
    }

    /// Shift the clock of the next blocks by `secs`
    pub fn increase_time(&mut self, secs: u64) {
        self.timestamp = self.timestamp.saturating_add(HMoveTime::from_secs(secs));
    }

    /// Mine the block holding a call of `caller` and return its context
    pub fn call_context(&mut self, caller: &Address) -> CallContext {
        self.mine();
        CallContext::new(*caller, self.block, self.timestamp)
    }
}

impl Default for TestChain {
    fn default() -> Self {
        TestChain::new(1, HMoveTime::from_secs(1_700_000_000))
    }
}
