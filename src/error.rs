//! Error types for the Obelisk client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ObeliskError
pub type Result<T> = std::result::Result<T, ObeliskError>;

/// Unified error type for Obelisk client operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObeliskError {
    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    /// Reply was truncated, over-long or otherwise malformed.
    #[error("Bad stream: malformed or short response")]
    BadStream,

    #[error("Unknown point kind: 0x{0:02x}")]
    UnknownPointKind(u8),

    // -------------------------------------------------------------------------
    // Precondition Errors
    // -------------------------------------------------------------------------
    /// Prefix does not fit the one-byte bit-length field.
    #[error("Prefix too long: {bits} bits (max 255)")]
    PrefixTooLong { bits: usize },

    // -------------------------------------------------------------------------
    // Dispatch Errors (reported by the dealer)
    // -------------------------------------------------------------------------
    /// No reply within the configured timeout and resends.
    #[error("Request timed out")]
    Timeout,

    /// Raised by a `Dispatcher` implementation when it cannot deliver a request.
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Raised by a `Dispatcher` implementation when the server replies with a nonzero code.
    #[error("Server error code: {0}")]
    Server(u32),

    /// Both continuations were dropped without running.
    #[error("Request canceled before completion")]
    Canceled,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
