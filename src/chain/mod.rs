//! Chain Module
//!
//! Value types exchanged with the server and their wire codecs.
//!
//! All integers are little-endian. Every type here is created per call and
//! never shared between requests.

mod address;
mod binary;
mod hash;
mod header;
mod history;
mod point;
mod stealth;
mod transaction;
mod update;

pub use address::PaymentAddress;
pub use binary::Binary;
pub use hash::{
    bitcoin_hash, encode_hash, reversed, Hash, ShortHash, HASH_SIZE, NULL_HASH, SHORT_HASH_SIZE,
};
pub use header::{Header, HEADER_SIZE};
pub use history::{CompactHistoryRow, HistoryRow, PointKind, UNSPENT_HEIGHT};
pub use point::{OutputPoint, POINT_SIZE};
pub use stealth::{
    CompactStealthRow, EcCompressed, StealthRow, EC_COMPRESSED_SIZE, EPHEMERAL_PUBLIC_KEY_SIGN,
};
pub use transaction::{Input, Output, Transaction};
pub use update::{AddressUpdate, Notification, StealthUpdate, STEALTH_UPDATE_PREFIX_SIZE};
