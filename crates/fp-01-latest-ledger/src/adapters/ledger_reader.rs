//! Ledger Reader Adapter
//!
//! Connects the `ReaderProvider` port to `shared_types::LedgerTransactionReader`.

use shared_types::{LedgerCloseMeta, LedgerTransactionReader, ReadOutcome, ReaderError};

use crate::ports::outbound::{ReaderProvider, TransactionReader};

impl TransactionReader for LedgerTransactionReader<'_> {
    fn read(&mut self) -> Result<ReadOutcome, ReaderError> {
        LedgerTransactionReader::read(self)
    }
}

/// Default provider: hash-matching reader over `LedgerCloseMeta`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerReaderProvider;

impl ReaderProvider for LedgerReaderProvider {
    fn open<'a>(
        &self,
        network_passphrase: &str,
        ledger: &'a LedgerCloseMeta,
    ) -> Result<Box<dyn TransactionReader + 'a>, ReaderError> {
        let reader = LedgerTransactionReader::new(network_passphrase, ledger)?;
        Ok(Box::new(reader))
    }
}
