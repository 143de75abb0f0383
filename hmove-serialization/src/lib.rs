// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Binary serialization traits shared by every crate of the workspace.
//!
//! Words follow the 32-byte big-endian layout used when hashing typed data:
//! integers are left-padded with zeros, byte strings shorter than a word are
//! left-padded as well (addresses).

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

use displaydoc::Display;
use thiserror::Error;

mod word;

pub use word::{BytesWordSerializer, U256WordSerializer, WORD_SIZE_BYTES};

/// Errors raised while serializing
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum SerializeError {
    /// General error {0}
    GeneralError(String),
}

/// Serializes a value of type `T` by appending its bytes to a buffer
pub trait Serializer<T> {
    /// Append the serialized form of `value` to `buffer`
    fn serialize(&self, value: &T, buffer: &mut Vec<u8>) -> Result<(), SerializeError>;
}
