//! # Ledger Transaction Reader
//!
//! Walks the processing results of a `LedgerCloseMeta` in apply order and
//! pairs each with the envelope it was produced from.
//!
//! Envelopes are located by hash: every envelope in the transaction set is
//! hashed with the network id when the reader is opened. A result whose hash
//! has no envelope yields `ReadOutcome::Unreadable` and the walk continues.

use std::collections::HashMap;

use tracing::debug;

use crate::entities::{
    network_id, FeeBumpInnerTx, Hash, LedgerCloseMeta, TransactionEnvelope, TransactionResult,
    TransactionResultMeta,
};
use crate::errors::ReaderError;

/// Highest `LedgerCloseMeta::version` this reader understands.
pub const MAX_SUPPORTED_META_VERSION: u8 = 1;

/// One transaction with its envelope and processing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransaction {
    /// 1-based position in apply order.
    pub index: u32,
    /// Network-scoped transaction hash.
    pub hash: Hash,
    pub envelope: TransactionEnvelope,
    pub result: TransactionResult,
}

/// A processing result whose envelope is not in the transaction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnreadableTransaction {
    /// 1-based position in apply order.
    pub index: u32,
    /// Hash the result refers to.
    pub hash: Hash,
}

impl UnreadableTransaction {
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

/// What a single `read` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Transaction(LedgerTransaction),
    Unreadable(UnreadableTransaction),
    EndOfLedger,
}

/// Reader over the transactions of one ledger.
pub struct LedgerTransactionReader<'a> {
    envelopes: HashMap<Hash, &'a TransactionEnvelope>,
    results: std::slice::Iter<'a, TransactionResultMeta>,
    next_index: u32,
}

impl<'a> LedgerTransactionReader<'a> {
    /// Open a reader for `meta` on the network named by `network_passphrase`.
    ///
    /// # Errors
    ///
    /// - `EmptyPassphrase` if the passphrase is empty
    /// - `UnsupportedMetaVersion` if `meta.version` is newer than supported
    /// - `Serialization` if an envelope cannot be hashed
    /// - `DuplicateTransaction` if two envelopes share a hash
    pub fn new(network_passphrase: &str, meta: &'a LedgerCloseMeta) -> Result<Self, ReaderError> {
        if network_passphrase.is_empty() {
            return Err(ReaderError::EmptyPassphrase);
        }
        if meta.version > MAX_SUPPORTED_META_VERSION {
            return Err(ReaderError::UnsupportedMetaVersion {
                version: meta.version,
            });
        }

        let id = network_id(network_passphrase);
        let mut envelopes = HashMap::with_capacity(meta.tx_set.len());
        for envelope in &meta.tx_set {
            let hash = envelope.hash(&id)?;
            if envelopes.insert(hash, envelope).is_some() {
                return Err(ReaderError::DuplicateTransaction {
                    hash: hex::encode(hash),
                });
            }
        }

        debug!(
            ledger = meta.sequence(),
            envelopes = envelopes.len(),
            results = meta.tx_processing.len(),
            "Opened ledger transaction reader"
        );

        Ok(Self {
            envelopes,
            results: meta.tx_processing.iter(),
            next_index: 1,
        })
    }

    /// Read the next transaction in apply order.
    pub fn read(&mut self) -> Result<ReadOutcome, ReaderError> {
        let Some(meta) = self.results.next() else {
            return Ok(ReadOutcome::EndOfLedger);
        };

        let index = self.next_index;
        self.next_index += 1;

        if meta.result.fee_charged < 0 {
            return Err(ReaderError::Corrupt {
                index,
                reason: format!("negative fee_charged {}", meta.result.fee_charged),
            });
        }

        match self.envelopes.get(&meta.transaction_hash) {
            Some(envelope) => {
                if let Some(fee) = declared_resource_fee(envelope).filter(|fee| *fee < 0) {
                    return Err(ReaderError::Corrupt {
                        index,
                        reason: format!("negative resource_fee {}", fee),
                    });
                }
                Ok(ReadOutcome::Transaction(LedgerTransaction {
                    index,
                    hash: meta.transaction_hash,
                    envelope: (*envelope).clone(),
                    result: meta.result.clone(),
                }))
            }
            None => Ok(ReadOutcome::Unreadable(UnreadableTransaction {
                index,
                hash: meta.transaction_hash,
            })),
        }
    }
}

/// Resource fee declared by a smart-contract transaction, if any.
fn declared_resource_fee(envelope: &TransactionEnvelope) -> Option<i64> {
    let tx = match envelope {
        TransactionEnvelope::TxV0(_) => return None,
        TransactionEnvelope::Tx(env) => &env.tx,
        TransactionEnvelope::FeeBump(env) => match &env.tx.inner_tx {
            FeeBumpInnerTx::Tx(inner) => &inner.tx,
        },
    };
    tx.ext.soroban_data().map(|data| data.resource_fee)
}
