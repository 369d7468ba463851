//! Core entities for the Latest-Ledger processor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DecodeError;
use super::value_objects::{ResourceUsage, TransactionClassification};

/// Metrics extracted from one ledger.
///
/// Counters are accumulated during a single scan of the ledger's
/// transactions; `transactions_per_second` is filled in last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatestLedger {
    pub sequence: u32,
    /// Hex-encoded ledger hash.
    pub hash: String,
    pub transaction_count: u64,
    /// Operations of every transaction submitted to the ledger.
    pub tx_set_operation_count: u64,
    /// Operations of successful transactions only.
    pub successful_operation_count: u64,
    pub successful_tx_count: u64,
    /// Includes unknown transactions.
    pub failed_tx_count: u64,
    pub total_fee_charged: i64,
    pub closed_at: DateTime<Utc>,
    pub base_fee: u32,

    /// Successful operations per second (what other chains call TPS).
    pub transactions_per_second: f64,

    // Smart-contract metrics
    pub soroban_tx_count: u64,
    pub total_soroban_fees: i64,
    pub total_resource_instructions: u64,
    pub total_read_bytes: u64,
    pub total_write_bytes: u64,

    pub skipped_tx_count: u64,
    pub unknown_tx_count: u64,
}

impl LatestLedger {
    /// Record with header fields set and every counter at zero.
    pub fn new(sequence: u32, hash: String, closed_at: DateTime<Utc>, base_fee: u32) -> Self {
        Self {
            sequence,
            hash,
            transaction_count: 0,
            tx_set_operation_count: 0,
            successful_operation_count: 0,
            successful_tx_count: 0,
            failed_tx_count: 0,
            total_fee_charged: 0,
            closed_at,
            base_fee,
            transactions_per_second: 0.0,
            soroban_tx_count: 0,
            total_soroban_fees: 0,
            total_resource_instructions: 0,
            total_read_bytes: 0,
            total_write_bytes: 0,
            skipped_tx_count: 0,
            unknown_tx_count: 0,
        }
    }

    /// Fold in one readable transaction.
    ///
    /// Leaves the record untouched when the fee total would overflow.
    pub(crate) fn record_transaction(
        &mut self,
        classification: &TransactionClassification,
    ) -> Result<(), DecodeError> {
        self.total_fee_charged = self
            .total_fee_charged
            .checked_add(classification.fee_charged)
            .ok_or(DecodeError::FeeOverflow {
                sequence: self.sequence,
                field: "total_fee_charged",
            })?;
        self.transaction_count += 1;
        self.tx_set_operation_count += classification.operation_count;

        if classification.is_successful {
            self.successful_tx_count += 1;
            self.successful_operation_count += classification.operation_count;
        } else {
            self.failed_tx_count += 1;
        }
        Ok(())
    }

    /// Fold in the resources of one smart-contract transaction.
    pub(crate) fn record_resource_usage(&mut self, usage: &ResourceUsage) -> Result<(), DecodeError> {
        self.total_soroban_fees = self
            .total_soroban_fees
            .checked_add(usage.resource_fee)
            .ok_or(DecodeError::FeeOverflow {
                sequence: self.sequence,
                field: "total_soroban_fees",
            })?;
        self.soroban_tx_count += 1;
        self.total_resource_instructions += u64::from(usage.instructions);
        self.total_read_bytes += u64::from(usage.read_bytes);
        self.total_write_bytes += u64::from(usage.write_bytes);
        Ok(())
    }

    /// Count a result whose transaction could not be recovered.
    pub(crate) fn record_unknown(&mut self) {
        self.transaction_count += 1;
        self.failed_tx_count += 1;
        self.unknown_tx_count += 1;
    }

    /// JSON encoding handed to downstream consumers.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn empty() -> LatestLedger {
        let closed_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        LatestLedger::new(100, "ab".repeat(32), closed_at, 100)
    }

    #[test]
    fn test_new_record_is_zeroed() {
        let ledger = empty();
        assert_eq!(ledger.transaction_count, 0);
        assert_eq!(ledger.total_fee_charged, 0);
        assert_eq!(ledger.transactions_per_second, 0.0);
    }

    #[test]
    fn test_failed_transaction_counts_operations_but_not_successes() {
        let mut ledger = empty();
        ledger
            .record_transaction(&TransactionClassification {
                is_successful: false,
                operation_count: 3,
                fee_charged: 100,
            })
            .unwrap();

        assert_eq!(ledger.transaction_count, 1);
        assert_eq!(ledger.failed_tx_count, 1);
        assert_eq!(ledger.tx_set_operation_count, 3);
        assert_eq!(ledger.successful_operation_count, 0);
        assert_eq!(ledger.total_fee_charged, 100);
    }

    #[test]
    fn test_unknown_counts_as_failed() {
        let mut ledger = empty();
        ledger.record_unknown();

        assert_eq!(ledger.transaction_count, 1);
        assert_eq!(ledger.failed_tx_count, 1);
        assert_eq!(ledger.unknown_tx_count, 1);
        assert_eq!(ledger.total_fee_charged, 0);
    }

    #[test]
    fn test_fee_overflow_leaves_record_untouched() {
        let mut ledger = empty();
        let paid = |fee_charged| TransactionClassification {
            is_successful: true,
            operation_count: 1,
            fee_charged,
        };
        ledger.record_transaction(&paid(i64::MAX)).unwrap();

        let err = ledger.record_transaction(&paid(1)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::FeeOverflow {
                sequence: 100,
                field: "total_fee_charged",
            }
        );
        assert_eq!(ledger.transaction_count, 1);
        assert_eq!(ledger.total_fee_charged, i64::MAX);
    }

    #[test]
    fn test_soroban_fee_overflow() {
        let mut ledger = empty();
        let usage = |resource_fee| ResourceUsage {
            resource_fee,
            ..ResourceUsage::default()
        };
        ledger.record_resource_usage(&usage(i64::MAX)).unwrap();

        assert!(matches!(
            ledger.record_resource_usage(&usage(i64::MAX)),
            Err(DecodeError::FeeOverflow {
                field: "total_soroban_fees",
                ..
            })
        ));
        assert_eq!(ledger.soroban_tx_count, 1);
    }

    #[test]
    fn test_json_field_names() {
        let json: serde_json::Value = serde_json::from_slice(&empty().to_json().unwrap()).unwrap();
        for field in [
            "sequence",
            "hash",
            "transaction_count",
            "tx_set_operation_count",
            "successful_operation_count",
            "successful_tx_count",
            "failed_tx_count",
            "total_fee_charged",
            "closed_at",
            "base_fee",
            "transactions_per_second",
            "soroban_tx_count",
            "total_soroban_fees",
            "total_resource_instructions",
            "skipped_tx_count",
            "unknown_tx_count",
        ] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(json["closed_at"], "2023-11-14T22:13:20Z");
    }
}
