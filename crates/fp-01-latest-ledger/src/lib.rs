//! # FP-01: Latest-Ledger Processor
//!
//! Summarizes each closed ledger into a `LatestLedger` record: transaction
//! and operation counts, fees, smart-contract resource usage and an
//! estimated throughput.
//!
//! ## Architecture
//!
//! - **Domain**: Result record, classification and resource value objects, errors
//! - **Algorithms**: Classifier, resource-usage extractor, rate estimator
//! - **Ports**: Inbound (LatestLedgerApi) and Outbound (ReaderProvider, LedgerConsumer)
//! - **Application**: Per-ledger aggregation service
//! - **Adapters**: Default ledger reader, GraphQL schema strings
//! - **IPC**: Handler forwarding records to downstream consumers
//!
//! ## Processing Rules
//!
//! - Transactions are read in apply order; the reader is the only source of order.
//! - A result whose transaction is missing from the set counts as failed and
//!   unknown. Any other read failure discards the whole ledger.
//! - Throughput is successful operations divided by the seconds since the
//!   previous ledger processed by the same instance, or by 5 when there is
//!   no usable previous close time.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use adapters::LedgerReaderProvider;
pub use application::service::LatestLedgerProcessor;
pub use config::ProcessorConfig;
pub use domain::entities::*;
pub use domain::errors::{ConfigError, ConsumerError, DecodeError, HandlerError};
pub use domain::value_objects::*;
pub use ipc::{ForwardMessage, InboundMessage, LatestLedgerHandler, MessageMetadata, Payload};
pub use ports::inbound::LatestLedgerApi;
pub use ports::outbound::{LedgerConsumer, ReaderProvider, TransactionReader};
