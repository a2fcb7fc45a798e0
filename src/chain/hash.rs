//! Hash types and byte-order helpers

use sha2::{Digest, Sha256};

/// Size of a full hash in bytes
pub const HASH_SIZE: usize = 32;

/// Size of a short (RIPEMD-160 sized) hash in bytes
pub const SHORT_HASH_SIZE: usize = 20;

/// A 32-byte hash (transaction or block)
pub type Hash = [u8; HASH_SIZE];

/// A 20-byte hash (payment address, public key hash)
pub type ShortHash = [u8; SHORT_HASH_SIZE];

/// The all-zero hash, used as the "no spend" marker
pub const NULL_HASH: Hash = [0u8; HASH_SIZE];

/// Return a copy of `bytes` in reverse order.
///
/// The Obelisk wire format carries address and public key hashes reversed.
pub fn reversed<const N: usize>(bytes: &[u8; N]) -> [u8; N] {
    let mut out = *bytes;
    out.reverse();
    out
}

/// Double SHA-256, as used for block and transaction identifiers
pub fn bitcoin_hash(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    second.into()
}

/// Render a hash in the conventional display order (reversed hex)
pub fn encode_hash(hash: &Hash) -> String {
    hex::encode(reversed(hash))
}

pub(crate) fn serialize_hash<S: serde::Serializer>(
    hash: &Hash,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode_hash(hash))
}

pub(crate) fn serialize_hex<S: serde::Serializer, T: AsRef<[u8]>>(
    bytes: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}
