// Copyright (c) 2022 MASSA LABS <info@massa.net>

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]
//! Keccak-256 hashing used to build identities and signed digests

pub use error::HMoveHashError;
pub use hash::{Hash, HashSerializer};
pub use settings::HASH_SIZE_BYTES;

mod error;
mod hash;
mod settings;
