// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! # Overview
//!
//! This crate is meant to be imported by crates driving a governance token.
//! It exports the token configuration, errors, events, the typed-data payloads
//! authorized by signature and the `TokenController` trait implemented by
//! `hmove_token_worker`.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod config;
mod controller;
mod error;
mod event;
mod event_store;
mod recovery;
mod types;

/// typed, domain-separated signature payloads
pub mod typed_data;

pub use config::{TokenConfig, TokenSettings, TOKEN_DECIMALS};
pub use controller::TokenController;
pub use error::TokenError;
pub use event::{EmittedEvent, EventContext, TokenEvent};
pub use event_store::{EventFilter, EventStore};
#[cfg(feature = "test-exports")]
pub use recovery::MockSignerRecovery;
pub use recovery::SignerRecovery;
pub use types::{CallContext, Checkpoint};
