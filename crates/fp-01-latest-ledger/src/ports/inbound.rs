//! Inbound Ports (Driving Ports / API)

use shared_types::LedgerCloseMeta;

use crate::domain::entities::LatestLedger;
use crate::domain::errors::DecodeError;

/// Primary Latest-Ledger API
pub trait LatestLedgerApi {
    /// Summarize one ledger.
    ///
    /// Takes `&mut self`: the throughput estimate depends on the previous
    /// ledger processed by this instance, so calls must be sequential.
    ///
    /// ## Returns
    ///
    /// - `Ok(LatestLedger)`: complete record, throughput included
    /// - `Err(DecodeError)`: ledger could not be read; no partial record
    fn process_ledger(&mut self, ledger: &LedgerCloseMeta) -> Result<LatestLedger, DecodeError>;

    /// Network passphrase transaction hashes are scoped to.
    fn network_passphrase(&self) -> &str;
}
