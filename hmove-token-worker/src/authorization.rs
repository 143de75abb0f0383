// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Verification of typed payloads authorized by signature

use hmove_hash::Hash;
use hmove_models::{Address, Amount};
use hmove_signature::Signature;
use hmove_time::HMoveTime;
use hmove_token_exports::typed_data::{
    typed_data_digest, Delegation, Eip712Domain, Permit, TypedData,
};
use hmove_token_exports::{SignerRecovery, TokenError};
use std::collections::BTreeMap;

/// Recovers signers with secp256k1 public key recovery
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover_signer(&self, digest: &Hash, signature: &Signature) -> Result<Address, TokenError> {
        signature
            .recover(digest)
            .map(|public_key| Address::from_public_key(&public_key))
            .map_err(|err| TokenError::InvalidSignature(err.to_string()))
    }
}

/// A verified payload. Its nonce is only consumed by `AuthorizationVerifier::consume`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Authorized {
    pub signer: Address,
    next_nonce: u64,
}

/// Domain separator and per-account nonces
#[derive(Debug, Clone)]
pub(crate) struct AuthorizationVerifier {
    domain_separator: Hash,
    nonces: BTreeMap<Address, u64>,
}

impl AuthorizationVerifier {
    pub fn new(domain: &Eip712Domain) -> Result<Self, TokenError> {
        Ok(AuthorizationVerifier {
            domain_separator: domain.separator()?,
            nonces: BTreeMap::new(),
        })
    }

    pub fn domain_separator(&self) -> Hash {
        self.domain_separator
    }

    pub fn nonce(&self, account: &Address) -> u64 {
        self.nonces.get(account).copied().unwrap_or(0)
    }

    /// Check a permit signed by `owner` against its current nonce
    #[allow(clippy::too_many_arguments)]
    pub fn verify_permit(
        &self,
        recovery: &dyn SignerRecovery,
        now: HMoveTime,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: HMoveTime,
        signature: &Signature,
    ) -> Result<Authorized, TokenError> {
        if now > deadline {
            return Err(TokenError::ExpiredDeadline { deadline, now });
        }
        let nonce = self.nonce(&owner);
        let permit = Permit {
            owner,
            spender,
            value,
            nonce,
            deadline,
        };
        let digest = typed_data_digest(&self.domain_separator, &permit.struct_hash()?);
        let signer = self.recover(recovery, &digest, signature)?;
        if signer != owner {
            return Err(TokenError::InvalidSignature(format!(
                "permit signed by {} on behalf of {}",
                signer, owner
            )));
        }
        Self::authorized(signer, nonce)
    }

    /// Check a delegation signed with the signer's current nonce
    pub fn verify_delegation(
        &self,
        recovery: &dyn SignerRecovery,
        now: HMoveTime,
        delegatee: Option<Address>,
        nonce: u64,
        expiry: HMoveTime,
        signature: &Signature,
    ) -> Result<Authorized, TokenError> {
        if now > expiry {
            return Err(TokenError::ExpiredSignature { expiry, now });
        }
        let delegation = Delegation {
            delegatee,
            nonce,
            expiry,
        };
        let digest = typed_data_digest(&self.domain_separator, &delegation.struct_hash()?);
        let signer = self.recover(recovery, &digest, signature)?;
        let expected = self.nonce(&signer);
        if expected != nonce {
            return Err(TokenError::InvalidNonce {
                account: signer,
                expected,
                got: nonce,
            });
        }
        Self::authorized(signer, nonce)
    }

    /// Burn the nonce of a verified payload
    pub fn consume(&mut self, authorized: Authorized) {
        self.nonces.insert(authorized.signer, authorized.next_nonce);
    }

    fn authorized(signer: Address, nonce: u64) -> Result<Authorized, TokenError> {
        Ok(Authorized {
            signer,
            next_nonce: nonce.checked_add(1).ok_or(TokenError::AmountOverflow)?,
        })
    }

    fn recover(
        &self,
        recovery: &dyn SignerRecovery,
        digest: &Hash,
        signature: &Signature,
    ) -> Result<Address, TokenError> {
        let signer = recovery.recover_signer(digest, signature)?;
        if signer.is_zero() {
            return Err(TokenError::InvalidSignature("recovered the zero address".to_string()));
        }
        Ok(signer)
    }
}
