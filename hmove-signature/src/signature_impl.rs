// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::HMoveSignatureError;
use hmove_hash::Hash;
use libsecp256k1::{Message, RecoveryId};
use std::{convert::TryInto, str::FromStr};

/// Size of an uncompressed public key
pub const PUBLIC_KEY_SIZE_BYTES: usize = 65;
/// Size of a keypair (the secret scalar)
pub const KEYPAIR_SIZE_BYTES: usize = 32;
/// Size of a signature (`r`, `s`, then `v`)
pub const SIGNATURE_SIZE_BYTES: usize = 65;
const SCALAR_SIZE_BYTES: usize = 32;
const RECOVERY_BYTE_OFFSET: u8 = 27;

fn decode_hex<const N: usize>(data: &str) -> Result<[u8; N], HMoveSignatureError> {
    let data = data.strip_prefix("0x").unwrap_or(data);
    let decoded = hex::decode(data)
        .map_err(|err| HMoveSignatureError::ParsingError(format!("hex parsing error: {}", err)))?;
    decoded.as_slice().try_into().map_err(|_| {
        HMoveSignatureError::ParsingError(format!("expected {} bytes, got {}", N, decoded.len()))
    })
}

/// `KeyPair` is used for signing
#[derive(Clone)]
pub struct KeyPair(libsecp256k1::SecretKey);

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "KeyPair({})", self.get_public_key())
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for KeyPair {}

impl FromStr for KeyPair {
    type Err = HMoveSignatureError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPair::from_bytes(&decode_hex::<KEYPAIR_SIZE_BYTES>(s)?)
    }
}

impl KeyPair {
    /// Generate a new `KeyPair`
    ///
    /// # Example
    ///  ```
    /// # use hmove_signature::KeyPair;
    /// # use hmove_hash::Hash;
    /// let keypair = KeyPair::generate();
    /// let data = Hash::compute_from("Hello World!".as_bytes());
    /// let signature = keypair.sign(&data);
    /// ```
    pub fn generate() -> KeyPair {
        KeyPair(libsecp256k1::SecretKey::random(&mut rand::thread_rng()))
    }

    /// Returns the recoverable Signature produced by signing a digest.
    /// The `s` value is always normalized to the lower half of the curve order.
    pub fn sign(&self, hash: &Hash) -> Signature {
        let message = Message::parse(hash.to_bytes());
        let (signature, recovery_id) = libsecp256k1::sign(&message, &self.0);
        let compact = signature.serialize();
        let mut r = [0u8; SCALAR_SIZE_BYTES];
        let mut s = [0u8; SCALAR_SIZE_BYTES];
        r.copy_from_slice(&compact[..SCALAR_SIZE_BYTES]);
        s.copy_from_slice(&compact[SCALAR_SIZE_BYTES..]);
        Signature::from_parts(r, s, recovery_id.serialize() + RECOVERY_BYTE_OFFSET)
    }

    /// Return the secret bytes of the keypair
    pub fn to_bytes(&self) -> [u8; KEYPAIR_SIZE_BYTES] {
        self.0.serialize()
    }

    /// Convert a byte array of size `KEYPAIR_SIZE_BYTES` to a `KeyPair`
    ///
    /// # Example
    /// ```
    /// # use hmove_signature::KeyPair;
    /// let keypair = KeyPair::generate();
    /// let bytes = keypair.to_bytes();
    /// let keypair2 = KeyPair::from_bytes(&bytes).unwrap();
    /// assert_eq!(keypair, keypair2);
    /// ```
    pub fn from_bytes(data: &[u8; KEYPAIR_SIZE_BYTES]) -> Result<Self, HMoveSignatureError> {
        libsecp256k1::SecretKey::parse(data)
            .map(KeyPair)
            .map_err(|err| {
                HMoveSignatureError::ParsingError(format!(
                    "private key bytes parsing error: {:?}",
                    err
                ))
            })
    }

    /// Get the public key of the keypair
    pub fn get_public_key(&self) -> PublicKey {
        PublicKey(libsecp256k1::PublicKey::from_secret_key(&self.0))
    }

    /// Hex form of the secret bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// Public key used to check who signed a digest.
#[derive(Clone)]
pub struct PublicKey(libsecp256k1::PublicKey);

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for PublicKey {
    type Err = HMoveSignatureError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicKey::from_bytes(&decode_hex::<PUBLIC_KEY_SIZE_BYTES>(s)?)
    }
}

impl PublicKey {
    /// Uncompressed SEC1 encoding (`0x04 || x || y`)
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE_BYTES] {
        self.0.serialize()
    }

    /// Parses an uncompressed SEC1 encoding
    pub fn from_bytes(
        data: &[u8; PUBLIC_KEY_SIZE_BYTES],
    ) -> Result<PublicKey, HMoveSignatureError> {
        libsecp256k1::PublicKey::parse(data)
            .map(PublicKey)
            .map_err(|err| {
                HMoveSignatureError::ParsingError(format!(
                    "public key bytes parsing error: {:?}",
                    err
                ))
            })
    }
}

impl ::serde::Serialize for PublicKey {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(self)
        } else {
            s.serialize_bytes(&self.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for PublicKey {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<PublicKey, D::Error> {
        if d.is_human_readable() {
            struct HexVisitor;

            impl<'de> ::serde::de::Visitor<'de> for HexVisitor {
                type Value = PublicKey;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a 0x-prefixed hex string")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    PublicKey::from_str(v).map_err(E::custom)
                }
            }
            d.deserialize_str(HexVisitor)
        } else {
            struct BytesVisitor;

            impl<'de> ::serde::de::Visitor<'de> for BytesVisitor {
                type Value = PublicKey;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a bytestring")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    PublicKey::from_bytes(&v.try_into().map_err(E::custom)?).map_err(E::custom)
                }
            }

            d.deserialize_bytes(BytesVisitor)
        }
    }
}

/// Recoverable signature. Nothing is validated at construction:
/// malformed values are only rejected by `recover`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    r: [u8; SCALAR_SIZE_BYTES],
    s: [u8; SCALAR_SIZE_BYTES],
    v: u8,
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Signature {
    type Err = HMoveSignatureError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex::<SIGNATURE_SIZE_BYTES>(s)?;
        Ok(Signature::from_bytes(&bytes))
    }
}

impl Signature {
    /// Builds a signature from its `r`, `s` and `v` components
    pub const fn from_parts(r: [u8; SCALAR_SIZE_BYTES], s: [u8; SCALAR_SIZE_BYTES], v: u8) -> Self {
        Signature { r, s, v }
    }

    /// `r` component
    pub fn r(&self) -> &[u8; SCALAR_SIZE_BYTES] {
        &self.r
    }

    /// `s` component
    pub fn s(&self) -> &[u8; SCALAR_SIZE_BYTES] {
        &self.s
    }

    /// recovery byte
    pub fn v(&self) -> u8 {
        self.v
    }

    /// `r || s || v`
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE_BYTES] {
        let mut bytes = [0u8; SIGNATURE_SIZE_BYTES];
        bytes[..SCALAR_SIZE_BYTES].copy_from_slice(&self.r);
        bytes[SCALAR_SIZE_BYTES..2 * SCALAR_SIZE_BYTES].copy_from_slice(&self.s);
        bytes[2 * SCALAR_SIZE_BYTES] = self.v;
        bytes
    }

    /// Splits `r || s || v`
    pub fn from_bytes(data: &[u8; SIGNATURE_SIZE_BYTES]) -> Self {
        let mut r = [0u8; SCALAR_SIZE_BYTES];
        let mut s = [0u8; SCALAR_SIZE_BYTES];
        r.copy_from_slice(&data[..SCALAR_SIZE_BYTES]);
        s.copy_from_slice(&data[SCALAR_SIZE_BYTES..2 * SCALAR_SIZE_BYTES]);
        Signature::from_parts(r, s, data[2 * SCALAR_SIZE_BYTES])
    }

    /// Recovers the public key that produced this signature over `hash`.
    ///
    /// Fails if `v` is not 27 or 28, if `s` is in the upper half of the curve order,
    /// or if no public key can be recovered.
    ///
    /// # Example
    ///  ```
    /// # use hmove_signature::KeyPair;
    /// # use hmove_hash::Hash;
    /// let keypair = KeyPair::generate();
    /// let data = Hash::compute_from("Hello World!".as_bytes());
    /// let signature = keypair.sign(&data);
    /// assert_eq!(signature.recover(&data).unwrap(), keypair.get_public_key());
    /// ```
    pub fn recover(&self, hash: &Hash) -> Result<PublicKey, HMoveSignatureError> {
        if self.v != RECOVERY_BYTE_OFFSET && self.v != RECOVERY_BYTE_OFFSET + 1 {
            return Err(HMoveSignatureError::InvalidRecoveryByte(self.v));
        }
        let mut compact = [0u8; 2 * SCALAR_SIZE_BYTES];
        compact[..SCALAR_SIZE_BYTES].copy_from_slice(&self.r);
        compact[SCALAR_SIZE_BYTES..].copy_from_slice(&self.s);
        let signature = libsecp256k1::Signature::parse_standard(&compact)
            .map_err(|err| HMoveSignatureError::EngineError(format!("{:?}", err)))?;
        if signature.s.is_high() {
            return Err(HMoveSignatureError::MalleableSignature);
        }
        let recovery_id = RecoveryId::parse(self.v - RECOVERY_BYTE_OFFSET)
            .map_err(|err| HMoveSignatureError::EngineError(format!("{:?}", err)))?;
        let message = Message::parse(hash.to_bytes());
        libsecp256k1::recover(&message, &signature, &recovery_id)
            .map(PublicKey)
            .map_err(|err| HMoveSignatureError::EngineError(format!("{:?}", err)))
    }
}

impl ::serde::Serialize for Signature {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(self)
        } else {
            s.serialize_bytes(&self.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for Signature {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Signature, D::Error> {
        if d.is_human_readable() {
            struct HexVisitor;

            impl<'de> ::serde::de::Visitor<'de> for HexVisitor {
                type Value = Signature;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a 0x-prefixed hex string")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Signature::from_str(v).map_err(E::custom)
                }
            }
            d.deserialize_str(HexVisitor)
        } else {
            struct BytesVisitor;

            impl<'de> ::serde::de::Visitor<'de> for BytesVisitor {
                type Value = Signature;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a bytestring")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Ok(Signature::from_bytes(&v.try_into().map_err(E::custom)?))
                }
            }

            d.deserialize_bytes(BytesVisitor)
        }
    }
}
