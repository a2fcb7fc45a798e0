//! Transaction output references

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use super::hash::{serialize_hash, Hash, NULL_HASH};
use crate::error::Result;
use crate::protocol::Reader;

/// Serialized size of a point: hash (32) + index (4)
pub const POINT_SIZE: usize = 36;

/// Checksum mask: upper 49 bits come from the hash, lower 15 from the index
const CHECKSUM_MASK: u64 = 0xffff_ffff_ffff_8000;

/// Reference to a transaction output (or, for spends, an input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutputPoint {
    #[serde(serialize_with = "serialize_hash")]
    pub hash: Hash,
    pub index: u32,
}

impl OutputPoint {
    pub fn new(hash: Hash, index: u32) -> Self {
        Self { hash, index }
    }

    /// The "no point" sentinel: null hash, maximum index
    pub fn null() -> Self {
        Self {
            hash: NULL_HASH,
            index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.hash == NULL_HASH && self.index == u32::MAX
    }

    /// Deterministic 64-bit key derived from the point.
    ///
    /// Reads eight bytes from the middle of the hash (offset 12) as a
    /// little-endian integer and keeps its upper 49 bits, then fills the
    /// lower 15 bits from the index. The server computes the same value for
    /// the `previous_checksum` of compact spend rows. Not collision free.
    pub fn checksum(&self) -> u64 {
        let mut middle = [0u8; 8];
        middle.copy_from_slice(&self.hash[12..20]);
        let tx = u64::from_le_bytes(middle);
        (tx & CHECKSUM_MASK) | (u64::from(self.index) & !CHECKSUM_MASK)
    }

    pub fn write_to(&self, out: &mut BytesMut) {
        out.put_slice(&self.hash);
        out.put_u32_le(self.index);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = BytesMut::with_capacity(POINT_SIZE);
        self.write_to(&mut out);
        out.to_vec()
    }

    pub fn from_reader(reader: &mut Reader) -> Result<Self> {
        let hash = reader.read_hash()?;
        let index = reader.read_4_bytes_le()?;
        Ok(Self { hash, index })
    }
}
