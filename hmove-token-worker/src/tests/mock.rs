// Copyright (c) 2022 MASSA LABS <info@massa.net>

use hmove_hash::Hash;
use hmove_models::Address;
use hmove_signature::Signature;
use hmove_token_exports::{SignerRecovery, TokenError};
use std::collections::HashMap;

/// Recovery answering from precomputed (digest, signature) fixtures
#[derive(Debug, Default, Clone)]
pub struct FixtureRecovery {
    fixtures: HashMap<(Hash, Signature), Address>,
}

impl FixtureRecovery {
    pub fn with_fixture(mut self, digest: Hash, signature: Signature, signer: Address) -> Self {
        self.fixtures.insert((digest, signature), signer);
        self
    }
}

impl SignerRecovery for FixtureRecovery {
    fn recover_signer(&self, digest: &Hash, signature: &Signature) -> Result<Address, TokenError> {
        self.fixtures
            .get(&(*digest, *signature))
            .copied()
            .ok_or_else(|| TokenError::InvalidSignature("unknown fixture".to_string()))
    }
}

/// Any 65 bytes will do, fixtures never verify them
pub fn fixture_signature(tag: u8) -> Signature {
    Signature::from_parts([tag; 32], [tag; 32], 27)
}
