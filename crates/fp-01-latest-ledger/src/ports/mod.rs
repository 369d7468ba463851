//! Ports module for the Latest-Ledger processor
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::LatestLedgerApi;
pub use outbound::{LedgerConsumer, ReaderProvider, TransactionReader};
