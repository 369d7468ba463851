//! IPC Module for the Latest-Ledger processor
//!
//! ## Message Boundaries
//!
//! - Accept: `InboundMessage` carrying a `LedgerCloseMeta`
//! - Send: `ForwardMessage` with a JSON `LatestLedger` to registered consumers

pub mod handler;
pub mod payloads;

pub use handler::LatestLedgerHandler;
pub use payloads::*;
