//! Stealth payment rows

use serde::Serialize;

use super::hash::{serialize_hash, serialize_hex, Hash, ShortHash};

/// Size of a compressed public key
pub const EC_COMPRESSED_SIZE: usize = 33;

/// Sign byte the server strips from every ephemeral key
pub const EPHEMERAL_PUBLIC_KEY_SIGN: u8 = 0x02;

/// Compressed secp256k1 public key
pub type EcCompressed = [u8; EC_COMPRESSED_SIZE];

/// Stealth row as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactStealthRow {
    /// Ephemeral key without its sign byte
    pub ephemeral_public_key_hash: Hash,
    /// Byte-reversed relative to the natural order
    pub public_key_hash: ShortHash,
    pub transaction_hash: Hash,
}

/// Stealth row handed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StealthRow {
    #[serde(serialize_with = "serialize_hex")]
    pub ephemeral_public_key: EcCompressed,
    #[serde(serialize_with = "serialize_hex")]
    pub public_key_hash: ShortHash,
    #[serde(serialize_with = "serialize_hash")]
    pub transaction_hash: Hash,
}
