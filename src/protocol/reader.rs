//! Response reader
//!
//! Cursor over a received reply. Every read either yields a value and
//! advances, or fails with `BadStream` when too few bytes remain.

use bytes::{Buf, Bytes};

use crate::chain::{Hash, ShortHash};
use crate::error::{ObeliskError, Result};

/// Sequential typed reader over a reply payload
#[derive(Debug, Clone)]
pub struct Reader {
    buf: Bytes,
}

impl Reader {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { buf: data.into() }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        !self.buf.has_remaining()
    }

    /// Fail unless every byte has been consumed
    pub fn expect_exhausted(&self) -> Result<()> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(ObeliskError::BadStream)
        }
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.buf.remaining() < needed {
            return Err(ObeliskError::BadStream);
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_2_bytes_le(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn read_4_bytes_le(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn read_8_bytes_le(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.buf.get_u64_le())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    pub fn read_hash(&mut self) -> Result<Hash> {
        self.read_array()
    }

    pub fn read_short_hash(&mut self) -> Result<ShortHash> {
        self.read_array()
    }

    /// Next `length` bytes without copying
    pub fn read_bytes(&mut self, length: usize) -> Result<Bytes> {
        self.ensure(length)?;
        Ok(self.buf.split_to(length))
    }

    /// Bitcoin CompactSize integer
    pub fn read_varint(&mut self) -> Result<u64> {
        match self.read_byte()? {
            0xfd => self.read_2_bytes_le().map(u64::from),
            0xfe => self.read_4_bytes_le().map(u64::from),
            0xff => self.read_8_bytes_le(),
            small => Ok(u64::from(small)),
        }
    }
}

impl From<Vec<u8>> for Reader {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&'static [u8]> for Reader {
    fn from(data: &'static [u8]) -> Self {
        Self::new(data)
    }
}
