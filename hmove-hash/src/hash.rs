// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::HMoveHashError;
use crate::settings::HASH_SIZE_BYTES;
use hmove_serialization::{SerializeError, Serializer};
use sha3::{Digest, Keccak256};
use std::{convert::TryInto, str::FromStr};

/// Keccak-256 digest
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default)]
pub struct Hash([u8; HASH_SIZE_BYTES]);

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::fmt::Debug for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Hash {
    /// Compute a hash from data.
    ///
    /// # Example
    ///  ```
    /// # use hmove_hash::Hash;
    /// let hash = Hash::compute_from("hello world".as_bytes());
    /// ```
    pub fn compute_from(data: &[u8]) -> Self {
        Hash(Keccak256::digest(data).into())
    }

    /// Compute a hash over several byte slices, as if they were concatenated.
    ///
    /// # Example
    ///  ```
    /// # use hmove_hash::Hash;
    /// let parts = Hash::compute_from_parts(&[b"hello ", b"world"]);
    /// assert_eq!(parts, Hash::compute_from(b"hello world"));
    /// ```
    pub fn compute_from_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Keccak256::new();
        for part in parts {
            hasher.update(part);
        }
        Hash(hasher.finalize().into())
    }

    /// Lowercase hex form, without prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a hex string, with or without `0x` prefix
    ///
    /// # Example
    ///  ```
    /// # use hmove_hash::Hash;
    /// let hash = Hash::compute_from("hello world".as_bytes());
    /// let parsed = Hash::from_hex(&hash.to_string()).unwrap();
    /// assert_eq!(hash, parsed);
    /// ```
    pub fn from_hex(data: &str) -> Result<Hash, HMoveHashError> {
        let data = data.strip_prefix("0x").unwrap_or(data);
        let decoded =
            hex::decode(data).map_err(|err| HMoveHashError::ParsingError(err.to_string()))?;
        Ok(Hash::from_bytes(&decoded.as_slice().try_into().map_err(
            |_| {
                HMoveHashError::ParsingError(format!(
                    "expected {} bytes, got {}",
                    HASH_SIZE_BYTES,
                    decoded.len()
                ))
            },
        )?))
    }

    /// Serialize a Hash as bytes.
    pub fn to_bytes(&self) -> &[u8; HASH_SIZE_BYTES] {
        &self.0
    }

    /// Convert into bytes.
    pub fn into_bytes(self) -> [u8; HASH_SIZE_BYTES] {
        self.0
    }

    /// Build a Hash from raw bytes
    pub const fn from_bytes(data: &[u8; HASH_SIZE_BYTES]) -> Hash {
        Hash(*data)
    }
}

/// Serializer for `Hash`
#[derive(Default, Clone)]
pub struct HashSerializer;

impl HashSerializer {
    /// Creates a serializer for `Hash`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<Hash> for HashSerializer {
    /// ```
    /// use hmove_serialization::Serializer;
    /// use hmove_hash::{Hash, HashSerializer};
    ///
    /// let hash = Hash::compute_from(b"hello world");
    /// let mut buffer = Vec::new();
    /// HashSerializer::new().serialize(&hash, &mut buffer).unwrap();
    /// assert_eq!(&buffer[..], hash.to_bytes());
    /// ```
    fn serialize(&self, value: &Hash, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend(value.to_bytes());
        Ok(())
    }
}

impl ::serde::Serialize for Hash {
    /// hex string when human readable, raw bytes otherwise
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(self)
        } else {
            s.serialize_bytes(self.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for Hash {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Hash, D::Error> {
        if d.is_human_readable() {
            struct HexVisitor;

            impl<'de> ::serde::de::Visitor<'de> for HexVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a 0x-prefixed hex string")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Hash::from_hex(v).map_err(E::custom)
                }
            }
            d.deserialize_str(HexVisitor)
        } else {
            struct BytesVisitor;

            impl<'de> ::serde::de::Visitor<'de> for BytesVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a bytestring")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Ok(Hash::from_bytes(v.try_into().map_err(E::custom)?))
                }
            }

            d.deserialize_bytes(BytesVisitor)
        }
    }
}

impl FromStr for Hash {
    type Err = HMoveHashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}
