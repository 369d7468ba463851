//! # Error Types
//!
//! Errors raised while opening or iterating a ledger close meta.

use thiserror::Error;

/// Errors that prevent a ledger from being read.
///
/// All variants are fatal for the ledger being read. A result that references
/// an unknown envelope is not an error; see `ReadOutcome::Unreadable`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// Meta layout this reader does not understand.
    #[error("Unsupported ledger close meta version: {version}")]
    UnsupportedMetaVersion { version: u8 },

    /// Transaction hashes cannot be derived without a network passphrase.
    #[error("Network passphrase must not be empty")]
    EmptyPassphrase,

    /// Envelope could not be encoded for hashing.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Two envelopes in the transaction set hash to the same value.
    #[error("Duplicate transaction in tx set: {hash}")]
    DuplicateTransaction { hash: String },

    /// Processing result at `index` holds values no valid ledger can contain.
    #[error("Corrupt transaction {index} in ledger close meta: {reason}")]
    Corrupt { index: u32, reason: String },
}

impl ReaderError {
    /// Position of the offending transaction, when the error concerns one.
    pub fn index(&self) -> Option<u32> {
        match self {
            Self::Corrupt { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<bincode::Error> for ReaderError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
