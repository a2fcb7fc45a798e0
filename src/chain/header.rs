//! Block headers

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use super::hash::{bitcoin_hash, serialize_hash, Hash};
use crate::error::Result;
use crate::protocol::Reader;

/// Serialized header size
pub const HEADER_SIZE: usize = 80;

/// An 80-byte block header
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Header {
    pub version: u32,
    #[serde(serialize_with = "serialize_hash")]
    pub previous_block_hash: Hash,
    #[serde(serialize_with = "serialize_hash")]
    pub merkle: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = BytesMut::with_capacity(HEADER_SIZE);
        out.put_u32_le(self.version);
        out.put_slice(&self.previous_block_hash);
        out.put_slice(&self.merkle);
        out.put_u32_le(self.timestamp);
        out.put_u32_le(self.bits);
        out.put_u32_le(self.nonce);
        out.to_vec()
    }

    pub fn from_reader(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            version: reader.read_4_bytes_le()?,
            previous_block_hash: reader.read_hash()?,
            merkle: reader.read_hash()?,
            timestamp: reader.read_4_bytes_le()?,
            bits: reader.read_4_bytes_le()?,
            nonce: reader.read_4_bytes_le()?,
        })
    }

    /// Block hash (double SHA-256 of the serialization)
    pub fn hash(&self) -> Hash {
        bitcoin_hash(&self.to_bytes())
    }
}
