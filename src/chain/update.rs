//! Subscription notifications pushed by the server
//!
//! Subscriptions expire after ten minutes unless renewed with
//! `address.renew`.

use serde::Serialize;

use super::address::PaymentAddress;
use super::hash::{serialize_hash, serialize_hex, Hash};

/// Number of prefix bytes echoed in a stealth update
pub const STEALTH_UPDATE_PREFIX_SIZE: usize = 4;

/// Body of an `address.update` notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressUpdate {
    pub address: PaymentAddress,
    pub height: u32,
    #[serde(serialize_with = "serialize_hash")]
    pub block_hash: Hash,
}

/// Body of an `address.stealth_update` notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StealthUpdate {
    #[serde(serialize_with = "serialize_hex")]
    pub prefix: [u8; STEALTH_UPDATE_PREFIX_SIZE],
    pub height: u32,
    #[serde(serialize_with = "serialize_hash")]
    pub block_hash: Hash,
}

/// A decoded server push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Address(AddressUpdate),
    Stealth(StealthUpdate),
}
