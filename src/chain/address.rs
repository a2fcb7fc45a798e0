//! Payment addresses

use std::fmt;

use serde::Serialize;

use super::hash::{serialize_hex, ShortHash, SHORT_HASH_SIZE};
use crate::error::{ObeliskError, Result};

/// Version byte plus the 20-byte hash identifying a payment destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PaymentAddress {
    pub version: u8,
    #[serde(serialize_with = "serialize_hex")]
    pub hash: ShortHash,
}

impl PaymentAddress {
    pub fn new(version: u8, hash: ShortHash) -> Self {
        Self { version, hash }
    }

    /// Parse from a version byte and a 40-character hex hash
    pub fn from_hex(version: u8, hash_hex: &str) -> Result<Self> {
        let bytes = hex::decode(hash_hex)
            .map_err(|e| ObeliskError::Config(format!("invalid address hash: {}", e)))?;
        let hash: ShortHash = bytes.as_slice().try_into().map_err(|_| {
            ObeliskError::Config(format!(
                "address hash must be {} bytes, got {}",
                SHORT_HASH_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self { version, hash })
    }
}

impl fmt::Display for PaymentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{}", self.version, hex::encode(self.hash))
    }
}
