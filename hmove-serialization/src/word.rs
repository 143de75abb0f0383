// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! 32-byte word codecs

use crate::{SerializeError, Serializer};

/// Size of an encoded word
pub const WORD_SIZE_BYTES: usize = 32;

/// Serializes an unsigned integer as a big-endian 32-byte word
#[derive(Clone, Copy, Default)]
pub struct U256WordSerializer;

impl U256WordSerializer {
    /// Creates a `U256WordSerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<u128> for U256WordSerializer {
    /// ```
    /// use hmove_serialization::{Serializer, U256WordSerializer};
    ///
    /// let mut buffer = Vec::new();
    /// U256WordSerializer::new().serialize(&258u128, &mut buffer).unwrap();
    /// assert_eq!(buffer.len(), 32);
    /// assert_eq!(&buffer[30..], &[1, 2]);
    /// ```
    fn serialize(&self, value: &u128, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(&[0u8; WORD_SIZE_BYTES - 16]);
        buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

impl Serializer<u64> for U256WordSerializer {
    fn serialize(&self, value: &u64, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        <Self as Serializer<u128>>::serialize(self, &u128::from(*value), buffer)
    }
}

/// Serializes a fixed-size byte string left-padded to a 32-byte word
#[derive(Clone, Copy, Default)]
pub struct BytesWordSerializer;

impl BytesWordSerializer {
    /// Creates a `BytesWordSerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl<const N: usize> Serializer<[u8; N]> for BytesWordSerializer {
    fn serialize(&self, value: &[u8; N], buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        if N > WORD_SIZE_BYTES {
            return Err(SerializeError::GeneralError(format!("{} bytes do not fit in a word", N)));
        }
        buffer.extend(std::iter::repeat(0u8).take(WORD_SIZE_BYTES - N));
        buffer.extend_from_slice(value);
        Ok(())
    }
}
