//! Error types for the Latest-Ledger processor

use shared_types::ReaderError;
use thiserror::Error;

/// A ledger could not be turned into a result record.
///
/// Fatal for the ledger: no partial record is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Transaction reader could not be opened.
    #[error("Error creating transaction reader for ledger {sequence}: {source}")]
    ReaderOpen {
        sequence: u32,
        #[source]
        source: ReaderError,
    },

    /// Reader failed mid-ledger for a reason other than an unknown transaction.
    #[error("Error reading transaction {index} of ledger {sequence}: {source}")]
    ReadTransaction {
        sequence: u32,
        index: u32,
        #[source]
        source: ReaderError,
    },

    /// Header close time cannot be represented as a timestamp.
    #[error("Ledger {sequence} close time {close_time} is out of range")]
    InvalidCloseTime { sequence: u32, close_time: u64 },

    /// A fee total does not fit in `i64`.
    #[error("Ledger {sequence} {field} overflows")]
    FeeOverflow { sequence: u32, field: &'static str },
}

impl DecodeError {
    /// Sequence of the ledger that failed.
    pub fn sequence(&self) -> u32 {
        match self {
            Self::ReaderOpen { sequence, .. }
            | Self::ReadTransaction { sequence, .. }
            | Self::InvalidCloseTime { sequence, .. }
            | Self::FeeOverflow { sequence, .. } => *sequence,
        }
    }
}

/// Processor configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required `network_passphrase` absent or empty.
    #[error("missing network_passphrase in config")]
    MissingNetworkPassphrase,

    /// `network_passphrase` present but not a string.
    #[error("network_passphrase must be a string, got {found}")]
    InvalidNetworkPassphrase { found: &'static str },

    /// Configuration text is not valid JSON.
    #[error("Invalid config JSON: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Failure handling one inbound message.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Payload is not a ledger close meta.
    #[error("expected LedgerCloseMeta, got {found}")]
    UnexpectedPayload { found: &'static str },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Result record could not be encoded.
    #[error("error marshaling latest ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Downstream consumer rejected a forwarded message.
#[derive(Debug, Clone, Error)]
#[error("consumer {consumer} failed: {reason}")]
pub struct ConsumerError {
    pub consumer: String,
    pub reason: String,
}
