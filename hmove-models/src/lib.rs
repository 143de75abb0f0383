// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Identities, amounts and shared settings machinery of the HyperMove token workspace

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

pub use address::Address;
pub use amount::Amount;
pub use error::ModelsError;

/// account identities
pub mod address;
/// fixed point token amounts
pub mod amount;
/// layered settings loading
pub mod config;
/// workspace-wide constants
pub mod constants;
/// models error
pub mod error;

/// Sequence point at which state changes are recorded: the host block number
pub type BlockNumber = u64;
