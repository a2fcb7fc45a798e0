//! Address history rows
//!
//! Two shapes exist: the compact wire row, which reports output and spend
//! events separately, and the expanded row handed to callers, which links
//! each output to the spend that consumed it.

use serde::Serialize;

use super::point::OutputPoint;

/// Spend height of an unspent output
pub const UNSPENT_HEIGHT: u64 = u32::MAX as u64;

/// Wire tag of a compact history row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PointKind {
    Output = 0x00,
    Spend = 0x01,
}

impl TryFrom<u8> for PointKind {
    type Error = u8;

    fn try_from(byte: u8) -> std::result::Result<Self, Self::Error> {
        match byte {
            0x00 => Ok(PointKind::Output),
            0x01 => Ok(PointKind::Spend),
            other => Err(other),
        }
    }
}

/// One compact wire row
///
/// Both variants occupy the same 8-byte wire slot for `value` and
/// `previous_checksum`; which one it is depends on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactHistoryRow {
    /// An output paying the address
    Output {
        point: OutputPoint,
        height: u32,
        value: u64,
    },

    /// An input spending one of the address's outputs
    Spend {
        point: OutputPoint,
        height: u32,
        /// Checksum of the output point being spent
        previous_checksum: u64,
    },
}

impl CompactHistoryRow {
    pub fn kind(&self) -> PointKind {
        match self {
            CompactHistoryRow::Output { .. } => PointKind::Output,
            CompactHistoryRow::Spend { .. } => PointKind::Spend,
        }
    }

    pub fn point(&self) -> &OutputPoint {
        match self {
            CompactHistoryRow::Output { point, .. } | CompactHistoryRow::Spend { point, .. } => {
                point
            }
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            CompactHistoryRow::Output { height, .. } | CompactHistoryRow::Spend { height, .. } => {
                *height
            }
        }
    }

    /// Contents of the shared 8-byte slot
    pub fn slot(&self) -> u64 {
        match self {
            CompactHistoryRow::Output { value, .. } => *value,
            CompactHistoryRow::Spend {
                previous_checksum, ..
            } => *previous_checksum,
        }
    }
}

/// A fully linked output and (optional) spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub output: OutputPoint,
    pub output_height: u64,
    pub value: u64,
    /// `OutputPoint::null()` when unspent
    pub spend: OutputPoint,
    /// `UNSPENT_HEIGHT` when unspent
    pub spend_height: u64,
}

impl HistoryRow {
    /// A row for an output with no spend yet
    pub fn unspent(output: OutputPoint, output_height: u64, value: u64) -> Self {
        Self {
            output,
            output_height,
            value,
            spend: OutputPoint::null(),
            spend_height: UNSPENT_HEIGHT,
        }
    }

    pub fn is_spent(&self) -> bool {
        !self.spend.is_null()
    }
}
