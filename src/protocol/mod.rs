//! Protocol Module
//!
//! Defines the Obelisk query protocol as seen from the client.
//!
//! ## Message Shape
//! Framing, request ids and reply error codes belong to the dispatcher.
//! This module only deals with the command name and payload:
//!
//! ```text
//! caller ─▶ request::* ─▶ (command, payload) ─▶ dispatcher ─▶ server
//! caller ◀─ handler ◀─ response::decode_* ◀─ Reader ◀─ dispatcher ◀─┘
//! ```
//!
//! ## Dialects
//! Two address history dialects coexist and are selected by command name:
//! - `address.fetch_history`: reversed hash, expanded reply
//! - `address.fetch_history2` / `blockchain.fetch_history`: compact reply
//!   reconciled client-side (see [`expand`])

mod command;
mod reader;

pub mod expand;
pub mod request;
pub mod response;

pub use command::{names, SubscribeType};
pub use expand::{expand_history, expand_stealth};
pub use reader::Reader;
pub use request::{Request, MAX_PREFIX_BITS};
