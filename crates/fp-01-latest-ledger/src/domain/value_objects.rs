//! Value objects for the Latest-Ledger processor

use serde::{Deserialize, Serialize};

/// Nominal ledger close interval of the network, in seconds.
///
/// Divisor for the throughput estimate when no usable elapsed time exists:
/// on the first ledger of an instance, and when close times do not advance.
pub const NOMINAL_CLOSE_INTERVAL_SECS: f64 = 5.0;

/// Per-transaction classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionClassification {
    /// Result code is a success (including fee-bump inner success).
    pub is_successful: bool,
    /// Operations submitted, regardless of outcome.
    pub operation_count: u64,
    /// Fee charged, regardless of outcome.
    pub fee_charged: i64,
}

/// Resources declared by a smart-contract transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub resource_fee: i64,
    pub instructions: u32,
    pub read_bytes: u32,
    pub write_bytes: u32,
}

/// Output of one rate computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateEstimate {
    /// Successful operations per second.
    pub transactions_per_second: f64,
    /// Close time to remember for the next ledger.
    pub next_close_time: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_interval() {
        assert_eq!(NOMINAL_CLOSE_INTERVAL_SECS, 5.0);
    }

    #[test]
    fn test_resource_usage_default_is_zero() {
        let usage = ResourceUsage::default();
        assert_eq!(usage.resource_fee, 0);
        assert_eq!(usage.instructions, 0);
        assert_eq!(usage.read_bytes, 0);
        assert_eq!(usage.write_bytes, 0);
    }
}
