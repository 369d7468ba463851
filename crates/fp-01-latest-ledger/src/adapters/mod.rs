//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits over the shared ledger model, plus the
//! schema strings the host exposes for query planning.

mod ledger_reader;
mod schema;

pub use ledger_reader::LedgerReaderProvider;
pub use schema::{query_definitions, schema_definition};
