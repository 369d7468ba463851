//! # Shared Types Crate
//!
//! Decoded ledger model shared by every processor in the workspace.
//!
//! ## Contents
//!
//! - **Entities**: `LedgerCloseMeta`, `LedgerHeader`, the transaction envelope
//!   sum type and processing results.
//! - **Reader**: `LedgerTransactionReader` pairs each processing result with
//!   the envelope it was produced from, keyed by network-scoped hash.
//! - **Errors**: `ReaderError` for meta that cannot be iterated.
//!
//! ## Design Principles
//!
//! - **Exhaustive Envelopes**: `TransactionEnvelope` is a closed enum. Code that
//!   needs per-variant behaviour matches on it without a wildcard arm.
//! - **Typed Soft Failures**: a result whose envelope is missing from the
//!   transaction set is reported as `ReadOutcome::Unreadable`, not as an error.

pub mod entities;
pub mod errors;
pub mod reader;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use entities::*;
pub use errors::*;
pub use reader::*;
