//! Response decoders
//!
//! Each `decode_*` consumes a whole reply and, only if every field was read
//! and nothing is left over, invokes its handler exactly once. On any
//! failure the handler is dropped uncalled and the error is returned to the
//! dispatcher.
//!
//! The matching `read_*` functions perform the same validation and return
//! the value instead of calling a handler.
//!
//! ## Reply Layouts (integers little-endian)
//! ```text
//! empty              (nothing)
//! height             height:4
//! transaction_index  block_height:4 index:4
//! validate           { input_index:4 }*
//! history (compact)  { kind:1 point:36 height:4 value|checksum:8 }*
//! history (legacy)   { output:36 output_height:8 value:8 spend:36 spend_height:8 }*
//! stealth            { ephemeral_hash:32 reversed_pubkey_hash:20 tx_hash:32 }*
//! address.update     version:1 hash:20 height:4 block_hash:32
//! stealth_update     prefix:4 height:4 block_hash:32
//! ```

use super::command::names;
use super::expand::{expand_history, expand_stealth};
use super::reader::Reader;
use crate::chain::{
    AddressUpdate, CompactHistoryRow, CompactStealthRow, Header, HistoryRow, Notification,
    OutputPoint, PaymentAddress, PointKind, StealthRow, StealthUpdate, Transaction,
};
use crate::error::{ObeliskError, Result};

// =============================================================================
// Scalar Replies
// =============================================================================

pub fn decode_empty<H: FnOnce()>(reader: &mut Reader, handler: H) -> Result<()> {
    reader.expect_exhausted()?;
    handler();
    Ok(())
}

pub fn decode_height<H: FnOnce(u32)>(reader: &mut Reader, handler: H) -> Result<()> {
    let height = read_height(reader)?;
    handler(height);
    Ok(())
}

pub fn decode_transaction<H: FnOnce(Transaction)>(reader: &mut Reader, handler: H) -> Result<()> {
    let tx = read_transaction(reader)?;
    handler(tx);
    Ok(())
}

pub fn decode_block_header<H: FnOnce(Header)>(reader: &mut Reader, handler: H) -> Result<()> {
    let header = read_block_header(reader)?;
    handler(header);
    Ok(())
}

/// Handler receives `(block_height, index)`
pub fn decode_transaction_index<H: FnOnce(u32, u32)>(
    reader: &mut Reader,
    handler: H,
) -> Result<()> {
    let (block_height, index) = read_transaction_index(reader)?;
    handler(block_height, index);
    Ok(())
}

pub fn read_height(reader: &mut Reader) -> Result<u32> {
    let height = reader.read_4_bytes_le()?;
    reader.expect_exhausted()?;
    Ok(height)
}

pub fn read_transaction(reader: &mut Reader) -> Result<Transaction> {
    let tx = Transaction::from_reader(reader)?;
    reader.expect_exhausted()?;
    Ok(tx)
}

pub fn read_block_header(reader: &mut Reader) -> Result<Header> {
    let header = Header::from_reader(reader)?;
    reader.expect_exhausted()?;
    Ok(header)
}

pub fn read_transaction_index(reader: &mut Reader) -> Result<(u32, u32)> {
    let block_height = reader.read_4_bytes_le()?;
    let index = reader.read_4_bytes_le()?;
    reader.expect_exhausted()?;
    Ok((block_height, index))
}

// =============================================================================
// Validation
// =============================================================================

/// Handler receives the indexes of inputs spending unconfirmed outputs
pub fn decode_validate<H: FnOnce(Vec<u32>)>(reader: &mut Reader, handler: H) -> Result<()> {
    let unconfirmed = read_validate(reader)?;
    handler(unconfirmed);
    Ok(())
}

pub fn read_validate(reader: &mut Reader) -> Result<Vec<u32>> {
    let mut unconfirmed = Vec::with_capacity(reader.remaining() / 4);
    while !reader.is_exhausted() {
        unconfirmed.push(reader.read_4_bytes_le()?);
    }
    Ok(unconfirmed)
}

// =============================================================================
// History
// =============================================================================

/// Compact history (`blockchain.fetch_history`, `address.fetch_history2`)
pub fn decode_history<H: FnOnce(Vec<HistoryRow>)>(reader: &mut Reader, handler: H) -> Result<()> {
    let compact = read_compact_history(reader)?;
    handler(expand_history(&compact));
    Ok(())
}

/// Expanded history (legacy `address.fetch_history`)
pub fn decode_expanded_history<H: FnOnce(Vec<HistoryRow>)>(
    reader: &mut Reader,
    handler: H,
) -> Result<()> {
    let rows = read_expanded_history(reader)?;
    handler(rows);
    Ok(())
}

pub fn read_compact_history(reader: &mut Reader) -> Result<Vec<CompactHistoryRow>> {
    let mut compact = Vec::new();
    while !reader.is_exhausted() {
        compact.push(read_compact_history_row(reader)?);
    }
    Ok(compact)
}

fn read_compact_history_row(reader: &mut Reader) -> Result<CompactHistoryRow> {
    let tag = reader.read_byte()?;
    let kind = PointKind::try_from(tag).map_err(ObeliskError::UnknownPointKind)?;
    let point = OutputPoint::from_reader(reader)?;
    let height = reader.read_4_bytes_le()?;
    let slot = reader.read_8_bytes_le()?;

    Ok(match kind {
        PointKind::Output => CompactHistoryRow::Output {
            point,
            height,
            value: slot,
        },
        PointKind::Spend => CompactHistoryRow::Spend {
            point,
            height,
            previous_checksum: slot,
        },
    })
}

/// Unspent rows arrive with the sentinel point and height already in place
pub fn read_expanded_history(reader: &mut Reader) -> Result<Vec<HistoryRow>> {
    let mut rows = Vec::new();
    while !reader.is_exhausted() {
        rows.push(HistoryRow {
            output: OutputPoint::from_reader(reader)?,
            output_height: reader.read_8_bytes_le()?,
            value: reader.read_8_bytes_le()?,
            spend: OutputPoint::from_reader(reader)?,
            spend_height: reader.read_8_bytes_le()?,
        });
    }
    Ok(rows)
}

// =============================================================================
// Stealth
// =============================================================================

pub fn decode_stealth<H: FnOnce(Vec<StealthRow>)>(reader: &mut Reader, handler: H) -> Result<()> {
    let compact = read_compact_stealth(reader)?;
    handler(expand_stealth(&compact));
    Ok(())
}

pub fn read_compact_stealth(reader: &mut Reader) -> Result<Vec<CompactStealthRow>> {
    let mut compact = Vec::new();
    while !reader.is_exhausted() {
        compact.push(CompactStealthRow {
            ephemeral_public_key_hash: reader.read_hash()?,
            public_key_hash: reader.read_short_hash()?,
            transaction_hash: reader.read_hash()?,
        });
    }
    Ok(compact)
}

// =============================================================================
// Notifications
// =============================================================================

pub fn decode_address_update<H: FnOnce(AddressUpdate)>(
    reader: &mut Reader,
    handler: H,
) -> Result<()> {
    let update = read_address_update(reader)?;
    handler(update);
    Ok(())
}

pub fn decode_stealth_update<H: FnOnce(StealthUpdate)>(
    reader: &mut Reader,
    handler: H,
) -> Result<()> {
    let update = read_stealth_update(reader)?;
    handler(update);
    Ok(())
}

pub fn read_address_update(reader: &mut Reader) -> Result<AddressUpdate> {
    let version = reader.read_byte()?;
    let hash = reader.read_short_hash()?;
    let height = reader.read_4_bytes_le()?;
    let block_hash = reader.read_hash()?;
    reader.expect_exhausted()?;
    Ok(AddressUpdate {
        address: PaymentAddress::new(version, hash),
        height,
        block_hash,
    })
}

pub fn read_stealth_update(reader: &mut Reader) -> Result<StealthUpdate> {
    let prefix = reader.read_array()?;
    let height = reader.read_4_bytes_le()?;
    let block_hash = reader.read_hash()?;
    reader.expect_exhausted()?;
    Ok(StealthUpdate {
        prefix,
        height,
        block_hash,
    })
}

/// Decode an unsolicited message by command name.
///
/// Returns `Ok(None)` for commands that are not subscription updates.
pub fn read_notification(command: &str, reader: &mut Reader) -> Result<Option<Notification>> {
    match command {
        names::ADDRESS_UPDATE => read_address_update(reader).map(|u| Some(Notification::Address(u))),
        names::ADDRESS_STEALTH_UPDATE => {
            read_stealth_update(reader).map(|u| Some(Notification::Stealth(u)))
        }
        _ => Ok(None),
    }
}
