//! # Flow Processor Node Runtime
//!
//! Hosts the latest-ledger processor behind a line-oriented pipeline.
//!
//! ## Modular Structure
//!
//! - `config` - Processor configuration from file or environment
//! - `consumers` - Downstream consumers writing forwarded records
//! - `pipeline` - JSON-lines ledger stream driving the handler
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from file/env)
//! 2. Initialize the handler and register the output consumer
//! 3. Stream ledgers until input closes

pub mod config;
pub mod consumers;
pub mod pipeline;

pub use config::load_config;
pub use consumers::JsonLinesConsumer;
pub use pipeline::{run_stream, RunSummary};
