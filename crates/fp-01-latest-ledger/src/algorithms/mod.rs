//! Algorithms module for the Latest-Ledger processor
//!
//! Contains:
//! - Transaction classification
//! - Resource-usage extraction
//! - Throughput rate estimation

pub mod classifier;
pub mod rate_estimator;
pub mod resource_extractor;

pub use classifier::classify;
pub use rate_estimator::{compute_rate, RateEstimator};
pub use resource_extractor::extract_resource_usage;
