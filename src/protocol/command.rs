//! Command definitions
//!
//! Wire command names understood by the server.

/// Wire command names
pub mod names {
    pub const PROTOCOL_BROADCAST_TRANSACTION: &str = "protocol.broadcast_transaction";
    pub const TRANSACTION_POOL_VALIDATE: &str = "transaction_pool.validate";
    pub const TRANSACTION_POOL_FETCH_TRANSACTION: &str = "transaction_pool.fetch_transaction";
    pub const BLOCKCHAIN_FETCH_TRANSACTION: &str = "blockchain.fetch_transaction";
    pub const BLOCKCHAIN_FETCH_LAST_HEIGHT: &str = "blockchain.fetch_last_height";
    pub const BLOCKCHAIN_FETCH_BLOCK_HEADER: &str = "blockchain.fetch_block_header";
    pub const BLOCKCHAIN_FETCH_TRANSACTION_INDEX: &str = "blockchain.fetch_transaction_index";
    pub const BLOCKCHAIN_FETCH_STEALTH: &str = "blockchain.fetch_stealth";
    pub const BLOCKCHAIN_FETCH_HISTORY: &str = "blockchain.fetch_history";

    /// First available in sx, obsolete since server v3 (reversed hash,
    /// expanded history reply).
    pub const ADDRESS_FETCH_HISTORY: &str = "address.fetch_history";

    /// First available in server v3 (natural hash order, compact reply).
    pub const ADDRESS_FETCH_HISTORY2: &str = "address.fetch_history2";

    pub const ADDRESS_SUBSCRIBE: &str = "address.subscribe";
    pub const ADDRESS_RENEW: &str = "address.renew";

    // Server-initiated notifications
    pub const ADDRESS_UPDATE: &str = "address.update";
    pub const ADDRESS_STEALTH_UPDATE: &str = "address.stealth_update";
}

/// Subscription discriminator (single wire byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubscribeType {
    Address = 0x00,
    Stealth = 0x01,
}

impl SubscribeType {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}
