//! Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use shared_types::{LedgerCloseMeta, ReadOutcome, ReaderError};

use crate::domain::errors::ConsumerError;
use crate::ipc::payloads::ForwardMessage;

/// Sequential reader over the transactions of one ledger.
pub trait TransactionReader {
    /// Next outcome in apply order. `EndOfLedger` once exhausted.
    fn read(&mut self) -> Result<ReadOutcome, ReaderError>;
}

/// Opens transaction readers over ledgers.
pub trait ReaderProvider: Send + Sync {
    /// Open a reader over `ledger` for the given network.
    fn open<'a>(
        &self,
        network_passphrase: &str,
        ledger: &'a LedgerCloseMeta,
    ) -> Result<Box<dyn TransactionReader + 'a>, ReaderError>;
}

/// Downstream stage receiving every forwarded record.
#[async_trait]
pub trait LedgerConsumer: Send + Sync {
    fn name(&self) -> &str;

    async fn consume(&self, message: &ForwardMessage) -> Result<(), ConsumerError>;
}
