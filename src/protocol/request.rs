//! Request builders
//!
//! One pure function per command. Each returns the wire command name with
//! its payload; identical arguments always produce identical bytes, so the
//! dealer may resend a request verbatim.
//!
//! ## Payload Layouts (integers little-endian)
//! ```text
//! protocol.broadcast_transaction      tx
//! transaction_pool.validate           tx
//! *.fetch_transaction                 tx_hash:32
//! blockchain.fetch_last_height        (empty)
//! blockchain.fetch_block_header       height:4 | block_hash:32
//! blockchain.fetch_transaction_index  tx_hash:32
//! blockchain.fetch_stealth            bits:1 prefix:n from_height:4
//! blockchain.fetch_history            version:1 reversed_hash:20 from_height:4
//! address.fetch_history               version:1 reversed_hash:20 from_height:4
//! address.fetch_history2              version:1 hash:20 from_height:4
//! address.subscribe / address.renew   type:1 bits:1 prefix:n
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::command::{names, SubscribeType};
use crate::chain::{reversed, Binary, Hash, PaymentAddress, Transaction, SHORT_HASH_SIZE};
use crate::error::{ObeliskError, Result};

/// Largest prefix expressible in the one-byte bit-length field
pub const MAX_PREFIX_BITS: usize = u8::MAX as usize;

/// A built request: command name plus payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub command: &'static str,
    pub payload: Bytes,
}

impl Request {
    fn new(command: &'static str, payload: impl Into<Bytes>) -> Self {
        Self {
            command,
            payload: payload.into(),
        }
    }
}

/// Bit length of a whole-address subscription prefix
const ADDRESS_PREFIX_BITS: u8 = (SHORT_HASH_SIZE * 8) as u8;

/// Reject prefixes that do not fit the bit-length byte
pub fn check_prefix(prefix: &Binary) -> Result<u8> {
    u8::try_from(prefix.size()).map_err(|_| ObeliskError::PrefixTooLong {
        bits: prefix.size(),
    })
}

// =============================================================================
// Transactions
// =============================================================================

pub fn protocol_broadcast_transaction(tx: &Transaction) -> Request {
    Request::new(names::PROTOCOL_BROADCAST_TRANSACTION, tx.to_bytes())
}

pub fn transaction_pool_validate(tx: &Transaction) -> Request {
    Request::new(names::TRANSACTION_POOL_VALIDATE, tx.to_bytes())
}

pub fn transaction_pool_fetch_transaction(tx_hash: &Hash) -> Request {
    Request::new(
        names::TRANSACTION_POOL_FETCH_TRANSACTION,
        Bytes::copy_from_slice(tx_hash),
    )
}

pub fn blockchain_fetch_transaction(tx_hash: &Hash) -> Request {
    Request::new(
        names::BLOCKCHAIN_FETCH_TRANSACTION,
        Bytes::copy_from_slice(tx_hash),
    )
}

pub fn blockchain_fetch_transaction_index(tx_hash: &Hash) -> Request {
    Request::new(
        names::BLOCKCHAIN_FETCH_TRANSACTION_INDEX,
        Bytes::copy_from_slice(tx_hash),
    )
}

// =============================================================================
// Blocks
// =============================================================================

pub fn blockchain_fetch_last_height() -> Request {
    Request::new(names::BLOCKCHAIN_FETCH_LAST_HEIGHT, Bytes::new())
}

pub fn blockchain_fetch_block_header_by_height(height: u32) -> Request {
    Request::new(
        names::BLOCKCHAIN_FETCH_BLOCK_HEADER,
        Bytes::copy_from_slice(&height.to_le_bytes()),
    )
}

pub fn blockchain_fetch_block_header_by_hash(block_hash: &Hash) -> Request {
    Request::new(
        names::BLOCKCHAIN_FETCH_BLOCK_HEADER,
        Bytes::copy_from_slice(block_hash),
    )
}

// =============================================================================
// Stealth and History
// =============================================================================

pub fn blockchain_fetch_stealth(prefix: &Binary, from_height: u32) -> Result<Request> {
    let bits = check_prefix(prefix)?;
    let mut payload = BytesMut::with_capacity(1 + prefix.blocks().len() + 4);
    payload.put_u8(bits);
    payload.put_slice(prefix.blocks());
    payload.put_u32_le(from_height);
    Ok(Request::new(names::BLOCKCHAIN_FETCH_STEALTH, payload))
}

/// Address hash reversed on the wire, compact reply
pub fn blockchain_fetch_history(address: &PaymentAddress, from_height: u32) -> Request {
    Request::new(
        names::BLOCKCHAIN_FETCH_HISTORY,
        history_payload(address.version, &reversed(&address.hash), from_height),
    )
}

/// Legacy dialect: address hash reversed on the wire, expanded reply
pub fn address_fetch_history(address: &PaymentAddress, from_height: u32) -> Request {
    Request::new(
        names::ADDRESS_FETCH_HISTORY,
        history_payload(address.version, &reversed(&address.hash), from_height),
    )
}

/// Current dialect: address hash in natural order, compact reply
pub fn address_fetch_history2(address: &PaymentAddress, from_height: u32) -> Request {
    Request::new(
        names::ADDRESS_FETCH_HISTORY2,
        history_payload(address.version, &address.hash, from_height),
    )
}

fn history_payload(version: u8, hash: &[u8; SHORT_HASH_SIZE], from_height: u32) -> Bytes {
    let mut payload = BytesMut::with_capacity(1 + SHORT_HASH_SIZE + 4);
    payload.put_u8(version);
    payload.put_slice(hash);
    payload.put_u32_le(from_height);
    payload.freeze()
}

// =============================================================================
// Subscriptions
// =============================================================================

pub fn address_subscribe(discriminator: SubscribeType, prefix: &Binary) -> Result<Request> {
    subscription(names::ADDRESS_SUBSCRIBE, discriminator, prefix)
}

/// Subscribe to every update for one payment address
pub fn address_subscribe_address(address: &PaymentAddress) -> Request {
    address_subscription(names::ADDRESS_SUBSCRIBE, address)
}

/// Keep an existing subscription alive; same layout as `address.subscribe`
pub fn address_renew(discriminator: SubscribeType, prefix: &Binary) -> Result<Request> {
    subscription(names::ADDRESS_RENEW, discriminator, prefix)
}

pub fn address_renew_address(address: &PaymentAddress) -> Request {
    address_subscription(names::ADDRESS_RENEW, address)
}

/// Full 160-bit prefix of the wire-order (reversed) address hash
pub fn address_prefix(address: &PaymentAddress) -> Binary {
    Binary::new(usize::from(ADDRESS_PREFIX_BITS), &reversed(&address.hash))
}

fn subscription(
    command: &'static str,
    discriminator: SubscribeType,
    prefix: &Binary,
) -> Result<Request> {
    let bits = check_prefix(prefix)?;
    Ok(Request::new(
        command,
        subscription_payload(discriminator, bits, prefix.blocks()),
    ))
}

fn address_subscription(command: &'static str, address: &PaymentAddress) -> Request {
    Request::new(
        command,
        subscription_payload(
            SubscribeType::Address,
            ADDRESS_PREFIX_BITS,
            &reversed(&address.hash),
        ),
    )
}

fn subscription_payload(discriminator: SubscribeType, bits: u8, blocks: &[u8]) -> Bytes {
    let mut payload = BytesMut::with_capacity(2 + blocks.len());
    payload.put_u8(discriminator.as_byte());
    payload.put_u8(bits);
    payload.put_slice(blocks);
    payload.freeze()
}
