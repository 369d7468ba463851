//! Throughput Rate Estimator
//!
//! Successful operations per second between consecutive ledgers.
//!
//! ## State Machine
//!
//! ```text
//! Uninitialized ──observe(t)──→ Initialized(t) ──observe(t')──→ Initialized(t')
//! ```
//!
//! Every observation overwrites the stored close time, including the ones
//! that fell back to the nominal interval.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::value_objects::{RateEstimate, NOMINAL_CLOSE_INTERVAL_SECS};

/// Compute the throughput for a ledger closing at `current`.
///
/// Falls back to `NOMINAL_CLOSE_INTERVAL_SECS` when there is no previous
/// close time, or when close times did not advance.
pub fn compute_rate(
    previous: Option<DateTime<Utc>>,
    current: DateTime<Utc>,
    successful_operation_count: u64,
) -> RateEstimate {
    let operations = successful_operation_count as f64;

    let transactions_per_second = match previous {
        Some(previous) => {
            let elapsed = (current - previous).num_milliseconds() as f64 / 1000.0;
            if elapsed > 0.0 {
                operations / elapsed
            } else {
                debug!(
                    %previous,
                    %current,
                    "Close time did not advance, using nominal interval"
                );
                operations / NOMINAL_CLOSE_INTERVAL_SECS
            }
        }
        None => operations / NOMINAL_CLOSE_INTERVAL_SECS,
    };

    RateEstimate {
        transactions_per_second,
        next_close_time: current,
    }
}

/// Holds the previous close time of one ledger stream.
///
/// One estimator per stream: sharing one between streams would mix their
/// close times.
#[derive(Clone, Debug, Default)]
pub struct RateEstimator {
    previous_close_time: Option<DateTime<Utc>>,
}

impl RateEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close time of the last observed ledger.
    pub fn previous_close_time(&self) -> Option<DateTime<Utc>> {
        self.previous_close_time
    }

    /// Rate for a ledger closing at `closed_at`, remembering `closed_at`.
    pub fn observe(&mut self, closed_at: DateTime<Utc>, successful_operation_count: u64) -> f64 {
        let estimate = compute_rate(self.previous_close_time, closed_at, successful_operation_count);
        self.previous_close_time = Some(estimate.next_close_time);
        estimate.transactions_per_second
    }
}
