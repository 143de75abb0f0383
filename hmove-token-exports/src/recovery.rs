// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::TokenError;
use hmove_hash::Hash;
use hmove_models::Address;
use hmove_signature::Signature;

/// Capability recovering the identity that signed a digest.
/// Kept behind a trait so token logic can be exercised with precomputed fixtures.
#[cfg_attr(feature = "test-exports", mockall::automock)]
pub trait SignerRecovery: Send + Sync {
    /// Address of the signer of `digest`.
    /// Fails with `InvalidSignature` when no identity can be recovered.
    fn recover_signer(&self, digest: &Hash, signature: &Signature) -> Result<Address, TokenError>;
}
