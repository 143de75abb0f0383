// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::constants::ADDRESS_SIZE_BYTES;
use crate::error::ModelsError;
use hmove_hash::Hash;
use hmove_serialization::{BytesWordSerializer, SerializeError, Serializer};
use hmove_signature::PublicKey;
use std::str::FromStr;

const ADDRESS_PREFIX: &str = "0x";

/// Account identity, derived from a public key.
/// The all-zero value is the conventional "nobody" identity and is never a valid counterparty.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Default)]
pub struct Address([u8; ADDRESS_SIZE_BYTES]);

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(self.0))
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Address {
    type Err = ModelsError;
    /// ## Example
    /// ```rust
    /// # use hmove_models::Address;
    /// # use std::str::FromStr;
    /// let address = Address::from_str("0x807a7bb5193edf9898b9092c1597bb966fe52514").unwrap();
    /// assert_eq!(address.to_string(), "0x807a7bb5193edf9898b9092c1597bb966fe52514");
    /// assert!(Address::from_str("807a7bb5193edf9898b9092c1597bb966fe52514").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s.strip_prefix(ADDRESS_PREFIX).ok_or_else(|| {
            ModelsError::AddressParseError(format!("missing {} prefix", ADDRESS_PREFIX))
        })?;
        let decoded =
            hex::decode(data).map_err(|err| ModelsError::AddressParseError(err.to_string()))?;
        let bytes: [u8; ADDRESS_SIZE_BYTES] = decoded.as_slice().try_into().map_err(|_| {
            ModelsError::AddressParseError(format!(
                "expected {} bytes, got {}",
                ADDRESS_SIZE_BYTES,
                decoded.len()
            ))
        })?;
        Ok(Address(bytes))
    }
}

impl Address {
    /// The zero identity
    pub const ZERO: Address = Address([0u8; ADDRESS_SIZE_BYTES]);

    /// Computes the address associated with a public key:
    /// the last 20 bytes of the keccak256 of the uncompressed point without its tag byte
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = Hash::compute_from(&public_key.to_bytes()[1..]);
        let mut bytes = [0u8; ADDRESS_SIZE_BYTES];
        bytes.copy_from_slice(&hash.to_bytes()[32 - ADDRESS_SIZE_BYTES..]);
        Address(bytes)
    }

    /// Build an address from raw bytes
    pub const fn from_bytes(data: &[u8; ADDRESS_SIZE_BYTES]) -> Self {
        Address(*data)
    }

    /// Raw bytes of the address
    pub fn to_bytes(&self) -> &[u8; ADDRESS_SIZE_BYTES] {
        &self.0
    }

    /// true for the zero identity
    pub fn is_zero(&self) -> bool {
        *self == Address::ZERO
    }
}

impl ::serde::Serialize for Address {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(&self.to_string())
        } else {
            s.serialize_bytes(self.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for Address {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Address, D::Error> {
        if d.is_human_readable() {
            struct AddressVisitor;

            impl<'de> ::serde::de::Visitor<'de> for AddressVisitor {
                type Value = Address;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("0x + hex(20 bytes)")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Address::from_str(v).map_err(E::custom)
                }
            }
            d.deserialize_str(AddressVisitor)
        } else {
            struct BytesVisitor;

            impl<'de> ::serde::de::Visitor<'de> for BytesVisitor {
                type Value = Address;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a bytestring")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Ok(Address::from_bytes(&v.try_into().map_err(E::custom)?))
                }
            }

            d.deserialize_bytes(BytesVisitor)
        }
    }
}

/// Serializes an `Address` as a left-padded 32-byte word
#[derive(Default, Clone)]
pub struct AddressSerializer {
    word_serializer: BytesWordSerializer,
}

impl AddressSerializer {
    /// Creates an `AddressSerializer`
    pub const fn new() -> Self {
        Self {
            word_serializer: BytesWordSerializer::new(),
        }
    }
}

impl Serializer<Address> for AddressSerializer {
    fn serialize(&self, value: &Address, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        self.word_serializer.serialize(value.to_bytes(), buffer)
    }
}
