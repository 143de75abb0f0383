// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Signature management
//!
//! Signatures are recoverable secp256k1 ECDSA signatures in the `(r, s, v)` layout,
//! with `v` in `{27, 28}` and `s` restricted to the lower half of the curve order.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]
mod error;
mod signature_impl;

pub use error::HMoveSignatureError;
pub use signature_impl::{
    KeyPair, PublicKey, Signature, KEYPAIR_SIZE_BYTES, PUBLIC_KEY_SIZE_BYTES,
    SIGNATURE_SIZE_BYTES,
};
