// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// models result
pub type ModelsResult<T, E = ModelsError> = core::result::Result<T, E>;

/// models error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelsError {
    /// address parsing error: {0}
    AddressParseError(String),
    /// amount parse error: {0}
    AmountParseError(String),
    /// Serialization error: {0}
    SerializeError(String),
    /// configuration error: {0}
    ConfigError(String),
}
