//! # Obelisk Client
//!
//! Client-side protocol layer for the Obelisk blockchain query service:
//! - Bit-exact request builders for every query command
//! - Reply decoders that reject truncated or over-long payloads
//! - Client-side reconciliation of compact address history
//! - Stealth row expansion (sign byte and hash order restoration)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Caller                               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ query + handlers
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Proxy (façade)                              │
//! │        request builder  +  decoder bound to handler          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ send_request(command, payload, ...)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │              Dispatcher (external dealer)                    │
//! │         sockets, correlation, timeouts, resends              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ reply bytes
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Decoders   │─────────▶│  Expansion  │
//!   │  (Reader)   │          │ history/stl │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod chain;
pub mod protocol;
pub mod proxy;
pub mod completion;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ObeliskError, Result};
pub use config::Config;
pub use proxy::{Dispatcher, Proxy};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the Obelisk client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
