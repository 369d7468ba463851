//! Transaction Classifier
//!
//! Success/failure split, operation count and fee of one transaction.

use shared_types::LedgerTransaction;

use crate::domain::value_objects::TransactionClassification;

/// Classify a transaction.
///
/// Operation count and fee are reported for failed transactions too: failed
/// transactions still submitted their operations and still pay a fee.
pub fn classify(tx: &LedgerTransaction) -> TransactionClassification {
    TransactionClassification {
        is_successful: tx.result.successful(),
        operation_count: tx.envelope.operations().len() as u64,
        fee_charged: tx.result.fee_charged,
    }
}
