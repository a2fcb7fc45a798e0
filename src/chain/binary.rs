//! Bit-level prefixes
//!
//! A prefix is a bit count plus the minimal bytes covering those bits.
//! Bits are ordered most-significant first within each byte and any unused
//! trailing bits of the last byte are zero.

use std::fmt;

use crate::error::{ObeliskError, Result};

const BYTE_BITS: usize = 8;

/// Variable-length bit pattern scoping stealth and address queries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Binary {
    bits: usize,
    blocks: Vec<u8>,
}

impl Binary {
    /// Number of bytes needed to hold `bits` bits
    pub fn blocks_size(bits: usize) -> usize {
        bits.div_ceil(BYTE_BITS)
    }

    /// Take the leading `bits` bits of `data`.
    ///
    /// If `data` is shorter than the requested size it is zero-extended.
    pub fn new(bits: usize, data: &[u8]) -> Self {
        let mut blocks = vec![0u8; Self::blocks_size(bits)];
        let copied = blocks.len().min(data.len());
        blocks[..copied].copy_from_slice(&data[..copied]);

        let used = bits % BYTE_BITS;
        if used != 0 {
            if let Some(last) = blocks.last_mut() {
                *last &= 0xffu8 << (BYTE_BITS - used);
            }
        }

        Self { bits, blocks }
    }

    /// Parse a string of `0`/`1` characters
    pub fn from_bit_string(text: &str) -> Result<Self> {
        let bits = text.len();
        let mut blocks = vec![0u8; Self::blocks_size(bits)];
        for (position, ch) in text.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => blocks[position / BYTE_BITS] |= 0x80 >> (position % BYTE_BITS),
                other => {
                    return Err(ObeliskError::Config(format!(
                        "invalid prefix character '{}'",
                        other
                    )))
                }
            }
        }
        Ok(Self { bits, blocks })
    }

    /// Number of significant bits
    pub fn size(&self) -> usize {
        self.bits
    }

    /// Minimal covering bytes
    pub fn blocks(&self) -> &[u8] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Bit at `index`, most significant first
    pub fn bit(&self, index: usize) -> bool {
        index < self.bits && self.blocks[index / BYTE_BITS] & (0x80 >> (index % BYTE_BITS)) != 0
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.bits {
            f.write_str(if self.bit(index) { "1" } else { "0" })?;
        }
        Ok(())
    }
}
