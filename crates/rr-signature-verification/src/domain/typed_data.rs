//! # Typed-Data Digests
//!
//! Domain-separated digest construction for signed root updates, laid out
//! byte-for-byte as EIP-712 so external signing tools produce compatible
//! signatures.
//!
//! ```text
//! domain_separator = keccak256(DOMAIN_TYPEHASH
//!                              || keccak256(name) || keccak256(version)
//!                              || uint256(network_id) || pad32(registry))
//! struct_hash      = keccak256(UPDATE_TYPEHASH || uint256(key) || new_root || uint256(nonce))
//! digest           = keccak256(0x19 || 0x01 || domain_separator || struct_hash)
//! ```

use super::ecdsa::keccak256;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainKey, Hash, Root};

/// EIP-712 domain type string.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Signed update type string. `chainId` here is the registry key.
pub const UPDATE_TYPE: &str = "UpdateChainRoot(uint256 chainId,bytes32 newRoot,uint256 nonce)";

/// Identity of one deployed registry, folded into every digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTag {
    /// Registry name
    pub name: String,
    /// Schema version literal
    pub version: String,
    /// Network / deployment identifier
    pub network_id: u64,
    /// Address identifying this registry instance
    pub registry: Address,
}

impl DomainTag {
    /// Create a new domain tag.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        network_id: u64,
        registry: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            network_id,
            registry,
        }
    }

    /// Domain separator for this deployment.
    pub fn separator(&self) -> Hash {
        let mut encoded = Vec::with_capacity(32 * 5);
        encoded.extend_from_slice(&keccak256(DOMAIN_TYPE.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.name.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.version.as_bytes()));
        encoded.extend_from_slice(&encode_u64(self.network_id));
        encoded.extend_from_slice(&encode_address(&self.registry));
        keccak256(&encoded)
    }
}

/// Struct hash of a single `(key, new_root, nonce)` update.
pub fn update_struct_hash(key: ChainKey, new_root: &Root, nonce: u64) -> Hash {
    let mut encoded = Vec::with_capacity(32 * 4);
    encoded.extend_from_slice(&keccak256(UPDATE_TYPE.as_bytes()));
    encoded.extend_from_slice(&encode_u64(key));
    encoded.extend_from_slice(new_root);
    encoded.extend_from_slice(&encode_u64(nonce));
    keccak256(&encoded)
}

/// Digest a signer commits to when authorizing `new_root` for `key`.
pub fn signing_digest(domain: &DomainTag, key: ChainKey, new_root: &Root, nonce: u64) -> Hash {
    let mut encoded = [0u8; 66];
    encoded[0] = 0x19;
    encoded[1] = 0x01;
    encoded[2..34].copy_from_slice(&domain.separator());
    encoded[34..].copy_from_slice(&update_struct_hash(key, new_root, nonce));
    keccak256(&encoded)
}

/// Big-endian uint256 encoding.
fn encode_u64(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Address left-padded to 32 bytes.
fn encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}
