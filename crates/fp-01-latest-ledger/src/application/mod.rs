//! # Application Layer
//!
//! Service orchestrating the per-ledger scan.

pub mod service;

pub use service::LatestLedgerProcessor;
