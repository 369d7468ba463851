//! Latest-Ledger Processor Service
//!
//! Main service implementing LatestLedgerApi.

use chrono::{DateTime, TimeZone, Utc};
use shared_types::{LedgerCloseMeta, ReadOutcome};
use tracing::{debug, info, warn};

use crate::adapters::LedgerReaderProvider;
use crate::algorithms::{classify, extract_resource_usage, RateEstimator};
use crate::config::ProcessorConfig;
use crate::domain::entities::LatestLedger;
use crate::domain::errors::{ConfigError, DecodeError};
use crate::domain::invariants;
use crate::ports::inbound::LatestLedgerApi;
use crate::ports::outbound::ReaderProvider;

/// Latest-Ledger Processor
///
/// Processes one ledger at a time:
/// 1. Open a transaction reader for the configured network
/// 2. Seed the record from the ledger header
/// 3. Classify each transaction and extract its resource usage
/// 4. Count unknown transactions as failed and keep going
/// 5. Estimate throughput against the previous ledger's close time
pub struct LatestLedgerProcessor<P: ReaderProvider = LedgerReaderProvider> {
    config: ProcessorConfig,
    provider: P,
    estimator: RateEstimator,
}

impl LatestLedgerProcessor {
    /// Create a processor reading ledgers with the default reader.
    pub fn new(config: ProcessorConfig) -> Result<Self, ConfigError> {
        Self::with_provider(config, LedgerReaderProvider)
    }
}

impl<P: ReaderProvider> LatestLedgerProcessor<P> {
    /// Create a processor with a custom reader provider.
    pub fn with_provider(config: ProcessorConfig, provider: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            estimator: RateEstimator::new(),
        })
    }

    /// Throughput state carried between ledgers.
    pub fn estimator(&self) -> &RateEstimator {
        &self.estimator
    }

    /// Scan every transaction of `ledger` into a record without a rate.
    fn scan(&self, ledger: &LedgerCloseMeta) -> Result<LatestLedger, DecodeError> {
        let sequence = ledger.sequence();

        let mut reader = self
            .provider
            .open(&self.config.network_passphrase, ledger)
            .map_err(|source| DecodeError::ReaderOpen { sequence, source })?;

        let closed_at = close_time(ledger)?;
        let mut metrics = LatestLedger::new(sequence, ledger.hash_hex(), closed_at, ledger.base_fee());

        // Index of the last outcome the reader reported.
        let mut last_index = 0u32;

        loop {
            let outcome = reader.read().map_err(|source| DecodeError::ReadTransaction {
                sequence,
                index: source.index().unwrap_or(last_index.saturating_add(1)),
                source,
            })?;

            match outcome {
                ReadOutcome::EndOfLedger => break,
                ReadOutcome::Unreadable(unknown) => {
                    warn!(
                        ledger = sequence,
                        index = unknown.index,
                        tx_hash = %unknown.hash_hex(),
                        "Transaction with unknown hash found in ledger"
                    );
                    last_index = unknown.index;
                    metrics.record_unknown();
                }
                ReadOutcome::Transaction(tx) => {
                    last_index = tx.index;
                    let classification = classify(&tx);
                    metrics.record_transaction(&classification)?;

                    if let Some(usage) = extract_resource_usage(&tx.envelope) {
                        metrics.record_resource_usage(&usage)?;
                    }

                    debug!(
                        ledger = sequence,
                        index = tx.index,
                        successful = classification.is_successful,
                        operations = classification.operation_count,
                        fee_charged = classification.fee_charged,
                        "Transaction counted"
                    );
                }
            }
        }

        Ok(metrics)
    }
}

impl<P: ReaderProvider> LatestLedgerApi for LatestLedgerProcessor<P> {
    fn process_ledger(&mut self, ledger: &LedgerCloseMeta) -> Result<LatestLedger, DecodeError> {
        let mut metrics = self.scan(ledger)?;

        metrics.transactions_per_second = self
            .estimator
            .observe(metrics.closed_at, metrics.successful_operation_count);

        debug_assert!(invariants::check_all(&metrics));

        info!(
            ledger = metrics.sequence,
            transactions = metrics.transaction_count,
            successful = metrics.successful_tx_count,
            failed = metrics.failed_tx_count,
            unknown = metrics.unknown_tx_count,
            soroban = metrics.soroban_tx_count,
            tps = metrics.transactions_per_second,
            "Ledger processed"
        );

        Ok(metrics)
    }

    fn network_passphrase(&self) -> &str {
        &self.config.network_passphrase
    }
}

fn close_time(ledger: &LedgerCloseMeta) -> Result<DateTime<Utc>, DecodeError> {
    let invalid = || DecodeError::InvalidCloseTime {
        sequence: ledger.sequence(),
        close_time: ledger.close_time(),
    };
    let secs = i64::try_from(ledger.close_time()).map_err(|_| invalid())?;
    Utc.timestamp_opt(secs, 0).single().ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::mocks::ScriptedReaderProvider;
    use shared_types::fixtures::{fee_bump, plain_tx, soroban_tx, LedgerBuilder, TEST_PASSPHRASE};
    use shared_types::{ReaderError, UnreadableTransaction};

    fn processor() -> LatestLedgerProcessor {
        LatestLedgerProcessor::new(ProcessorConfig::new(TEST_PASSPHRASE).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_ledger() {
        let meta = LedgerBuilder::new(100).with_base_fee(200).build();
        let record = processor().process_ledger(&meta).unwrap();

        assert_eq!(record.sequence, 100);
        assert_eq!(record.base_fee, 200);
        assert_eq!(record.hash, meta.hash_hex());
        assert_eq!(record.transaction_count, 0);
        assert_eq!(record.tx_set_operation_count, 0);
        assert_eq!(record.total_fee_charged, 0);
        assert_eq!(record.transactions_per_second, 0.0);
    }

    #[test]
    fn test_mixed_ledger_counters() {
        let meta = LedgerBuilder::new(100)
            .with_success(plain_tx(1, 3), 300)
            .with_failure(plain_tx(2, 2), 100)
            .with_success(soroban_tx(3, 5_000, 1_000_000, 64, 32), 5_100)
            .build();
        let record = processor().process_ledger(&meta).unwrap();

        assert_eq!(record.transaction_count, 3);
        assert_eq!(record.successful_tx_count, 2);
        assert_eq!(record.failed_tx_count, 1);
        assert_eq!(record.tx_set_operation_count, 6);
        assert_eq!(record.successful_operation_count, 4);
        assert_eq!(record.total_fee_charged, 5_500);
        assert_eq!(record.soroban_tx_count, 1);
        assert_eq!(record.total_soroban_fees, 5_000);
        assert_eq!(record.total_resource_instructions, 1_000_000);
        assert_eq!(record.total_read_bytes, 64);
        assert_eq!(record.total_write_bytes, 32);
        assert_eq!(record.skipped_tx_count, 0);
    }

    #[test]
    fn test_fee_bump_contract_transaction_counted() {
        let meta = LedgerBuilder::new(100)
            .with_success(fee_bump(soroban_tx(1, 2_500, 400_000, 0, 0), 10_000), 2_600)
            .build();
        let record = processor().process_ledger(&meta).unwrap();

        assert_eq!(record.soroban_tx_count, 1);
        assert_eq!(record.total_soroban_fees, 2_500);
        assert_eq!(record.successful_tx_count, 1);
    }

    #[test]
    fn test_unknown_transaction_tolerated() {
        let meta = LedgerBuilder::new(100)
            .with_success(plain_tx(1, 1), 100)
            .with_unknown_result(999)
            .build();
        let record = processor().process_ledger(&meta).unwrap();

        assert_eq!(record.transaction_count, 2);
        assert_eq!(record.unknown_tx_count, 1);
        assert_eq!(record.failed_tx_count, 1);
        assert_eq!(record.total_fee_charged, 100);
        assert_eq!(record.tx_set_operation_count, 1);
    }

    #[test]
    fn test_open_failure_is_decode_error() {
        let config = ProcessorConfig::new(TEST_PASSPHRASE).unwrap();
        let provider = ScriptedReaderProvider::failing(ReaderError::UnsupportedMetaVersion { version: 9 });
        let mut processor = LatestLedgerProcessor::with_provider(config, provider).unwrap();

        let err = processor
            .process_ledger(&LedgerBuilder::new(7).build())
            .unwrap_err();
        assert!(matches!(err, DecodeError::ReaderOpen { sequence: 7, .. }));
        assert!(processor.estimator().previous_close_time().is_none());
    }

    #[test]
    fn test_mid_ledger_failure_aborts_whole_ledger() {
        let meta = LedgerBuilder::new(7).with_success(plain_tx(1, 1), 100).build();
        let ReadOutcome::Transaction(tx) = shared_types::LedgerTransactionReader::new(TEST_PASSPHRASE, &meta)
            .unwrap()
            .read()
            .unwrap()
        else {
            panic!("expected transaction");
        };

        let provider = ScriptedReaderProvider::new(vec![
            Ok(ReadOutcome::Transaction(tx)),
            Ok(ReadOutcome::Unreadable(UnreadableTransaction {
                index: 2,
                hash: [1u8; 32],
            })),
            Err(ReaderError::Serialization("bad result".to_string())),
        ]);
        let config = ProcessorConfig::new(TEST_PASSPHRASE).unwrap();
        let mut processor = LatestLedgerProcessor::with_provider(config, provider).unwrap();

        let err = processor.process_ledger(&meta).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ReadTransaction {
                sequence: 7,
                index: 3,
                ..
            }
        ));
        assert!(processor.estimator().previous_close_time().is_none());
    }

    #[test]
    fn test_invalid_close_time() {
        let meta = LedgerBuilder::new(3).with_close_time(u64::MAX).build();
        let err = processor().process_ledger(&meta).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidCloseTime { sequence: 3, .. }));
    }

    #[test]
    fn test_rate_uses_previous_ledger() {
        let mut processor = processor();

        let first = LedgerBuilder::new(1)
            .with_close_time(1_700_000_000)
            .with_success(plain_tx(1, 50), 5_000)
            .build();
        assert_eq!(processor.process_ledger(&first).unwrap().transactions_per_second, 10.0);

        let second = LedgerBuilder::new(2)
            .with_close_time(1_700_000_010)
            .with_success(plain_tx(2, 100), 10_000)
            .build();
        assert_eq!(processor.process_ledger(&second).unwrap().transactions_per_second, 10.0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ProcessorConfig {
            network_passphrase: String::new(),
        };
        assert!(matches!(
            LatestLedgerProcessor::new(config),
            Err(ConfigError::MissingNetworkPassphrase)
        ));
    }

    #[test]
    fn test_corrupt_result_reports_reader_index() {
        let meta = LedgerBuilder::new(9)
            .with_success(plain_tx(1, 1), 100)
            .with_unknown_result(50)
            .with_success(plain_tx(2, 1), -500)
            .build();
        let mut processor = processor();

        let err = processor.process_ledger(&meta).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ReadTransaction {
                sequence: 9,
                index: 3,
                source: ReaderError::Corrupt { index: 3, .. },
            }
        ));
        assert!(processor.estimator().previous_close_time().is_none());
    }

    #[test]
    fn test_fee_total_overflow_is_decode_error() {
        let meta = LedgerBuilder::new(11)
            .with_success(plain_tx(1, 1), i64::MAX)
            .with_success(plain_tx(2, 1), 1)
            .build();
        let mut processor = processor();

        let err = processor.process_ledger(&meta).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FeeOverflow {
                sequence: 11,
                field: "total_fee_charged",
            }
        ));
        assert!(processor.estimator().previous_close_time().is_none());

        // The same instance keeps processing later ledgers.
        let next = LedgerBuilder::new(12).with_success(plain_tx(3, 5), 500).build();
        assert_eq!(processor.process_ledger(&next).unwrap().transactions_per_second, 1.0);
    }
}
