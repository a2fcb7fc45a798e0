//! Proxy Module
//!
//! Command dispatch façade over an external dispatcher.
//!
//! ## Responsibilities
//! - Reject oversized prefixes before anything is sent
//! - Build the request for each query
//! - Hand the request to the dispatcher together with the matching decoder,
//!   pre-bound to the caller's reply handler
//!
//! The dispatcher ("dealer") owns sockets, request correlation, timeouts and
//! resends. When a decoder returns an error the dispatcher is expected to
//! report it through the error handler; the reply handler is then never
//! called.

use bytes::Bytes;

use crate::chain::{
    Binary, Hash, Header, HistoryRow, PaymentAddress, StealthRow, Transaction,
};
use crate::config::Config;
use crate::error::{ObeliskError, Result};
use crate::protocol::{request, response, Reader, Request, SubscribeType};

/// Error continuation handed to the dispatcher
pub type ErrorHandler = Box<dyn FnOnce(ObeliskError) + Send>;

/// Success continuation: decodes the reply and invokes the caller's handler
pub type DecodeHandler = Box<dyn FnOnce(&mut Reader) -> Result<()> + Send>;

/// Boundary with the transport layer
pub trait Dispatcher {
    /// Receive the dealer parameters once, when the proxy is created
    fn configure(&mut self, _config: &Config) {}

    /// Send `payload` under `command`; later call exactly one of the handlers.
    fn send_request(
        &self,
        command: &'static str,
        payload: Bytes,
        on_error: ErrorHandler,
        on_success: DecodeHandler,
    );
}

/// One method per logical query
///
/// Holds no per-request state; every call builds its own payload and binds
/// its own handlers.
pub struct Proxy<D: Dispatcher> {
    dispatcher: D,
    config: Config,
}

impl<D: Dispatcher> Proxy<D> {
    pub fn new(mut dispatcher: D, config: Config) -> Self {
        tracing::debug!(
            "Proxy created (timeout {}ms, {} resends)",
            config.timeout_ms,
            config.resends
        );
        dispatcher.configure(&config);
        Self { dispatcher, config }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Fetchers
    // =========================================================================

    pub fn protocol_broadcast_transaction<E, H>(&self, tx: &Transaction, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce() + Send + 'static,
    {
        self.send(
            request::protocol_broadcast_transaction(tx),
            on_error,
            move |reader| response::decode_empty(reader, on_reply),
        );
    }

    /// Reply carries the indexes of inputs that spend unconfirmed outputs
    pub fn transaction_pool_validate<E, H>(&self, tx: &Transaction, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Vec<u32>) + Send + 'static,
    {
        self.send(
            request::transaction_pool_validate(tx),
            on_error,
            move |reader| response::decode_validate(reader, on_reply),
        );
    }

    pub fn transaction_pool_fetch_transaction<E, H>(&self, tx_hash: &Hash, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Transaction) + Send + 'static,
    {
        self.send(
            request::transaction_pool_fetch_transaction(tx_hash),
            on_error,
            move |reader| response::decode_transaction(reader, on_reply),
        );
    }

    pub fn blockchain_fetch_transaction<E, H>(&self, tx_hash: &Hash, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Transaction) + Send + 'static,
    {
        self.send(
            request::blockchain_fetch_transaction(tx_hash),
            on_error,
            move |reader| response::decode_transaction(reader, on_reply),
        );
    }

    pub fn blockchain_fetch_last_height<E, H>(&self, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(u32) + Send + 'static,
    {
        self.send(
            request::blockchain_fetch_last_height(),
            on_error,
            move |reader| response::decode_height(reader, on_reply),
        );
    }

    pub fn blockchain_fetch_block_header<E, H>(&self, height: u32, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Header) + Send + 'static,
    {
        self.send(
            request::blockchain_fetch_block_header_by_height(height),
            on_error,
            move |reader| response::decode_block_header(reader, on_reply),
        );
    }

    pub fn blockchain_fetch_block_header_by_hash<E, H>(
        &self,
        block_hash: &Hash,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Header) + Send + 'static,
    {
        self.send(
            request::blockchain_fetch_block_header_by_hash(block_hash),
            on_error,
            move |reader| response::decode_block_header(reader, on_reply),
        );
    }

    /// Reply handler receives `(block_height, index)`
    pub fn blockchain_fetch_transaction_index<E, H>(
        &self,
        tx_hash: &Hash,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(u32, u32) + Send + 'static,
    {
        self.send(
            request::blockchain_fetch_transaction_index(tx_hash),
            on_error,
            move |reader| response::decode_transaction_index(reader, on_reply),
        );
    }

    pub fn blockchain_fetch_stealth<E, H>(
        &self,
        prefix: &Binary,
        from_height: u32,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Vec<StealthRow>) + Send + 'static,
    {
        self.send_checked(
            request::blockchain_fetch_stealth(prefix, from_height),
            on_error,
            move |reader| response::decode_stealth(reader, on_reply),
        );
    }

    pub fn blockchain_fetch_history<E, H>(
        &self,
        address: &PaymentAddress,
        from_height: u32,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Vec<HistoryRow>) + Send + 'static,
    {
        self.send(
            request::blockchain_fetch_history(address, from_height),
            on_error,
            move |reader| response::decode_history(reader, on_reply),
        );
    }

    /// Obsolete since server v3; prefer `address_fetch_history2`
    pub fn address_fetch_history<E, H>(
        &self,
        address: &PaymentAddress,
        from_height: u32,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Vec<HistoryRow>) + Send + 'static,
    {
        self.send(
            request::address_fetch_history(address, from_height),
            on_error,
            move |reader| response::decode_expanded_history(reader, on_reply),
        );
    }

    pub fn address_fetch_history2<E, H>(
        &self,
        address: &PaymentAddress,
        from_height: u32,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce(Vec<HistoryRow>) + Send + 'static,
    {
        self.send(
            request::address_fetch_history2(address, from_height),
            on_error,
            move |reader| response::decode_history(reader, on_reply),
        );
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    /// Subscribe to updates for a single payment address
    pub fn address_subscribe<E, H>(&self, address: &PaymentAddress, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce() + Send + 'static,
    {
        self.send(
            request::address_subscribe_address(address),
            on_error,
            move |reader| response::decode_empty(reader, on_reply),
        );
    }

    /// Subscribe to an address or stealth prefix
    pub fn address_subscribe_prefix<E, H>(
        &self,
        discriminator: SubscribeType,
        prefix: &Binary,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce() + Send + 'static,
    {
        self.send_checked(
            request::address_subscribe(discriminator, prefix),
            on_error,
            move |reader| response::decode_empty(reader, on_reply),
        );
    }

    /// Subscriptions expire after ten minutes unless renewed
    pub fn address_renew<E, H>(&self, address: &PaymentAddress, on_error: E, on_reply: H)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce() + Send + 'static,
    {
        self.send(
            request::address_renew_address(address),
            on_error,
            move |reader| response::decode_empty(reader, on_reply),
        );
    }

    pub fn address_renew_prefix<E, H>(
        &self,
        discriminator: SubscribeType,
        prefix: &Binary,
        on_error: E,
        on_reply: H,
    ) where
        E: FnOnce(ObeliskError) + Send + 'static,
        H: FnOnce() + Send + 'static,
    {
        self.send_checked(
            request::address_renew(discriminator, prefix),
            on_error,
            move |reader| response::decode_empty(reader, on_reply),
        );
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Report a builder precondition failure without touching the dispatcher
    fn send_checked<E, F>(&self, built: Result<Request>, on_error: E, decode: F)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        F: FnOnce(&mut Reader) -> Result<()> + Send + 'static,
    {
        match built {
            Ok(request) => self.send(request, on_error, decode),
            Err(e) => {
                tracing::warn!("Request not sent: {}", e);
                on_error(e);
            }
        }
    }

    fn send<E, F>(&self, request: Request, on_error: E, decode: F)
    where
        E: FnOnce(ObeliskError) + Send + 'static,
        F: FnOnce(&mut Reader) -> Result<()> + Send + 'static,
    {
        let command = request.command;
        tracing::debug!("Sending {} ({} bytes)", command, request.payload.len());

        let on_success: DecodeHandler = Box::new(move |reader: &mut Reader| {
            let result = decode(reader);
            if let Err(ref e) = result {
                tracing::debug!("Rejected {} reply: {}", command, e);
            }
            result
        });

        self.dispatcher
            .send_request(command, request.payload, Box::new(on_error), on_success);
    }
}
