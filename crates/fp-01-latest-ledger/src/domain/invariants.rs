//! Domain invariants for the Latest-Ledger processor

use super::entities::LatestLedger;

/// INVARIANT-1: Transaction Balance
/// Every counted transaction is either successful or failed; unknown
/// transactions are counted as failed.
pub fn invariant_transaction_balance(ledger: &LatestLedger) -> bool {
    ledger.transaction_count == ledger.successful_tx_count + ledger.failed_tx_count
}

/// INVARIANT-2: Operation Ordering
/// Successful operations are a subset of submitted operations.
pub fn invariant_operation_ordering(ledger: &LatestLedger) -> bool {
    ledger.tx_set_operation_count >= ledger.successful_operation_count
}

/// INVARIANT-3: Unknown Subset
/// Unknown transactions are a subset of failed ones, and only readable
/// transactions can be smart-contract transactions.
pub fn invariant_unknown_subset(ledger: &LatestLedger) -> bool {
    ledger.unknown_tx_count <= ledger.failed_tx_count
        && ledger.soroban_tx_count
            <= ledger
                .transaction_count
                .saturating_sub(ledger.unknown_tx_count)
}

/// All invariants hold.
pub fn check_all(ledger: &LatestLedger) -> bool {
    invariant_transaction_balance(ledger)
        && invariant_operation_ordering(ledger)
        && invariant_unknown_subset(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ledger() -> LatestLedger {
        LatestLedger::new(1, String::new(), Utc::now(), 100)
    }

    #[test]
    fn test_empty_ledger_satisfies_all() {
        assert!(check_all(&ledger()));
    }

    #[test]
    fn test_balance_violation_detected() {
        let mut l = ledger();
        l.transaction_count = 3;
        l.successful_tx_count = 1;
        l.failed_tx_count = 1;
        assert!(!invariant_transaction_balance(&l));
    }

    #[test]
    fn test_operation_ordering_violation_detected() {
        let mut l = ledger();
        l.tx_set_operation_count = 2;
        l.successful_operation_count = 5;
        assert!(!invariant_operation_ordering(&l));
    }

    #[test]
    fn test_unknown_subset_violation_detected() {
        let mut l = ledger();
        l.transaction_count = 2;
        l.failed_tx_count = 2;
        l.unknown_tx_count = 1;
        l.soroban_tx_count = 2;
        assert!(!invariant_unknown_subset(&l));
    }
}
