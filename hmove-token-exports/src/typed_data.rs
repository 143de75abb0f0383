// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Typed, domain-separated payloads authorized by signature.
//!
//! Every payload is encoded as its type hash followed by one 32-byte word per
//! field, hashed with keccak256. The digest that gets signed is
//! `keccak256(0x19 0x01 ‖ domain separator ‖ struct hash)`.

use hmove_hash::{Hash, HashSerializer};
use hmove_models::address::AddressSerializer;
use hmove_models::amount::AmountSerializer;
use hmove_models::{Address, Amount};
use hmove_serialization::{SerializeError, Serializer, U256WordSerializer};
use hmove_time::{HMoveTime, HMoveTimeSerializer};
use lazy_static::lazy_static;

/// version string of the signing domain
pub const SIGNING_DOMAIN_VERSION: &str = "1";

const TYPED_DATA_PREFIX: &[u8; 2] = b"\x19\x01";

lazy_static! {
    /// keccak256 of the domain type signature
    pub static ref DOMAIN_TYPEHASH: Hash = Hash::compute_from(
        b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)"
    );
    /// keccak256 of the permit type signature
    pub static ref PERMIT_TYPEHASH: Hash = Hash::compute_from(
        b"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)"
    );
    /// keccak256 of the delegation type signature
    pub static ref DELEGATION_TYPEHASH: Hash =
        Hash::compute_from(b"Delegation(address delegatee,uint256 nonce,uint256 expiry)");
}

/// Payload that can be hashed for signature
pub trait TypedData {
    /// keccak256 of the encoded payload
    fn struct_hash(&self) -> Result<Hash, SerializeError>;
}

/// Final digest to sign for a payload under a domain separator
pub fn typed_data_digest(domain_separator: &Hash, struct_hash: &Hash) -> Hash {
    Hash::compute_from_parts(&[
        &TYPED_DATA_PREFIX[..],
        &domain_separator.to_bytes()[..],
        &struct_hash.to_bytes()[..],
    ])
}

/// Signing domain: binds signatures to one token on one chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    /// signing-domain name
    pub name: String,
    /// signing-domain version
    pub version: String,
    /// chain identifier of the environment
    pub chain_id: u64,
    /// address of the token
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Creates a domain with the fixed version
    pub fn new(name: &str, chain_id: u64, verifying_contract: Address) -> Self {
        Eip712Domain {
            name: name.to_string(),
            version: SIGNING_DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// The domain separator
    pub fn separator(&self) -> Result<Hash, SerializeError> {
        let mut buffer = Vec::new();
        Eip712DomainSerializer::new().serialize(self, &mut buffer)?;
        Ok(Hash::compute_from(&buffer))
    }
}

/// Serializer for `Eip712Domain`
#[derive(Default, Clone)]
pub struct Eip712DomainSerializer {
    hash_serializer: HashSerializer,
    u256_serializer: U256WordSerializer,
    address_serializer: AddressSerializer,
}

impl Eip712DomainSerializer {
    /// Creates an `Eip712DomainSerializer`
    pub const fn new() -> Self {
        Self {
            hash_serializer: HashSerializer::new(),
            u256_serializer: U256WordSerializer::new(),
            address_serializer: AddressSerializer::new(),
        }
    }
}

impl Serializer<Eip712Domain> for Eip712DomainSerializer {
    fn serialize(&self, value: &Eip712Domain, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        self.hash_serializer.serialize(&*DOMAIN_TYPEHASH, buffer)?;
        // dynamic strings are encoded as their hash
        self.hash_serializer
            .serialize(&Hash::compute_from(value.name.as_bytes()), buffer)?;
        self.hash_serializer
            .serialize(&Hash::compute_from(value.version.as_bytes()), buffer)?;
        self.u256_serializer.serialize(&value.chain_id, buffer)?;
        self.address_serializer
            .serialize(&value.verifying_contract, buffer)?;
        Ok(())
    }
}

/// Signed approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permit {
    /// owner of the funds, expected signer
    pub owner: Address,
    /// spender to approve
    pub spender: Address,
    /// allowance to set
    pub value: Amount,
    /// nonce of the owner
    pub nonce: u64,
    /// last valid timestamp
    pub deadline: HMoveTime,
}

impl TypedData for Permit {
    fn struct_hash(&self) -> Result<Hash, SerializeError> {
        let mut buffer = Vec::new();
        PermitSerializer::new().serialize(self, &mut buffer)?;
        Ok(Hash::compute_from(&buffer))
    }
}

/// Serializer for `Permit`
#[derive(Default, Clone)]
pub struct PermitSerializer {
    hash_serializer: HashSerializer,
    address_serializer: AddressSerializer,
    amount_serializer: AmountSerializer,
    u256_serializer: U256WordSerializer,
    time_serializer: HMoveTimeSerializer,
}

impl PermitSerializer {
    /// Creates a `PermitSerializer`
    pub const fn new() -> Self {
        Self {
            hash_serializer: HashSerializer::new(),
            address_serializer: AddressSerializer::new(),
            amount_serializer: AmountSerializer::new(),
            u256_serializer: U256WordSerializer::new(),
            time_serializer: HMoveTimeSerializer::new(),
        }
    }
}

impl Serializer<Permit> for PermitSerializer {
    fn serialize(&self, value: &Permit, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        self.hash_serializer.serialize(&*PERMIT_TYPEHASH, buffer)?;
        self.address_serializer.serialize(&value.owner, buffer)?;
        self.address_serializer.serialize(&value.spender, buffer)?;
        self.amount_serializer.serialize(&value.value, buffer)?;
        self.u256_serializer.serialize(&value.nonce, buffer)?;
        self.time_serializer.serialize(&value.deadline, buffer)?;
        Ok(())
    }
}

/// Signed delegation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    /// new delegatee, none is encoded as the zero address
    pub delegatee: Option<Address>,
    /// nonce of the signer
    pub nonce: u64,
    /// last valid timestamp
    pub expiry: HMoveTime,
}

impl TypedData for Delegation {
    fn struct_hash(&self) -> Result<Hash, SerializeError> {
        let mut buffer = Vec::new();
        DelegationSerializer::new().serialize(self, &mut buffer)?;
        Ok(Hash::compute_from(&buffer))
    }
}

/// Serializer for `Delegation`
#[derive(Default, Clone)]
pub struct DelegationSerializer {
    hash_serializer: HashSerializer,
    address_serializer: AddressSerializer,
    u256_serializer: U256WordSerializer,
    time_serializer: HMoveTimeSerializer,
}

impl DelegationSerializer {
    /// Creates a `DelegationSerializer`
    pub const fn new() -> Self {
        Self {
            hash_serializer: HashSerializer::new(),
            address_serializer: AddressSerializer::new(),
            u256_serializer: U256WordSerializer::new(),
            time_serializer: HMoveTimeSerializer::new(),
        }
    }
}

impl Serializer<Delegation> for DelegationSerializer {
    fn serialize(&self, value: &Delegation, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        self.hash_serializer
            .serialize(&*DELEGATION_TYPEHASH, buffer)?;
        self.address_serializer
            .serialize(&value.delegatee.unwrap_or(Address::ZERO), buffer)?;
        self.u256_serializer.serialize(&value.nonce, buffer)?;
        self.time_serializer.serialize(&value.expiry, buffer)?;
        Ok(())
    }
}
