// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// Signature errors
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone, PartialEq, Eq)]
pub enum HMoveSignatureError {
    /// parsing error: {0}
    ParsingError(String),

    /// invalid recovery byte: {0}
    InvalidRecoveryByte(u8),

    /// signature is malleable (high s value)
    MalleableSignature,

    /// secp256k1 engine error: {0}
    EngineError(String),
}
