// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! # General description
//!
//! The token worker implements `TokenController` on top of five components:
//! * `ledger`: balances, allowances and total supply
//! * `checkpoints`: block-indexed history of voting power
//! * `delegation`: delegatees and the voting power moves following balances
//! * `authorization`: permits and delegations authorized by signature
//! * `access`: single owner and pause flag
//!
//! `GovernanceToken` drives them. Calls are strictly sequential and a failed
//! call leaves no trace.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod access;
mod authorization;
mod checkpoints;
mod delegation;
mod ledger;
mod token;

pub use authorization::Secp256k1Recovery;
pub use token::GovernanceToken;

#[cfg(test)]
mod tests;
