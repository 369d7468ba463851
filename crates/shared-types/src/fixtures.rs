//! # Ledger Fixtures
//!
//! Builders for consistent `LedgerCloseMeta` values in tests. Results are
//! keyed by the real network-scoped envelope hash, so metas built here read
//! back exactly as a node would have produced them.

use sha2::{Digest, Sha256};

use crate::entities::*;

/// Passphrase the builders hash with unless told otherwise.
pub const TEST_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Deterministic account id for `byte`.
pub fn account(byte: u8) -> AccountId {
    [byte; 32]
}

/// A native payment to `account(0xBB)`.
pub fn payment_op(amount: i64) -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::Payment {
            destination: account(0xBB),
            asset: Asset::Native,
            amount,
        },
    }
}

fn payments(count: usize) -> Vec<Operation> {
    (0..count).map(|i| payment_op(i as i64 + 1)).collect()
}

/// Plain v1 transaction with `op_count` payments. `seq_num` keeps hashes distinct.
pub fn plain_tx(seq_num: i64, op_count: usize) -> TransactionEnvelope {
    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: Transaction {
            source_account: account(0xAA),
            fee: 100 * op_count as u32,
            seq_num,
            operations: payments(op_count),
            ext: TransactionExt::V0,
        },
        signatures: vec![],
    })
}

/// Legacy v0 transaction with `op_count` payments.
pub fn legacy_tx(seq_num: i64, op_count: usize) -> TransactionEnvelope {
    TransactionEnvelope::TxV0(TransactionV0Envelope {
        tx: TransactionV0 {
            source_account_ed25519: account(0xAA),
            fee: 100 * op_count as u32,
            seq_num,
            operations: payments(op_count),
        },
        signatures: vec![],
    })
}

/// Single-operation contract invocation carrying resource data.
pub fn soroban_tx(
    seq_num: i64,
    resource_fee: i64,
    instructions: u32,
    read_bytes: u32,
    write_bytes: u32,
) -> TransactionEnvelope {
    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: Transaction {
            source_account: account(0xAA),
            fee: 100 + resource_fee as u32,
            seq_num,
            operations: vec![Operation {
                source_account: None,
                body: OperationBody::InvokeHostFunction {
                    contract_id: [0xCC; 32],
                    function_name: "transfer".to_string(),
                },
            }],
            ext: TransactionExt::V1(SorobanTransactionData {
                resources: SorobanResources {
                    instructions,
                    read_bytes,
                    write_bytes,
                },
                resource_fee,
            }),
        },
        signatures: vec![],
    })
}

/// Wrap a plain v1 envelope in a fee-bump paid by `account(0xFE)`.
///
/// # Panics
///
/// If `inner` is not a v1 envelope; fee-bumps cannot wrap anything else.
pub fn fee_bump(inner: TransactionEnvelope, fee: i64) -> TransactionEnvelope {
    let TransactionEnvelope::Tx(inner) = inner else {
        panic!("fee-bump inner transaction must be a v1 envelope");
    };
    TransactionEnvelope::FeeBump(FeeBumpTransactionEnvelope {
        tx: FeeBumpTransaction {
            fee_source: account(0xFE),
            fee,
            inner_tx: FeeBumpInnerTx::Tx(inner),
        },
        signatures: vec![],
    })
}

/// Builds a `LedgerCloseMeta` one transaction at a time.
#[derive(Debug, Clone)]
pub struct LedgerBuilder {
    passphrase: String,
    header: LedgerHeader,
    tx_set: Vec<TransactionEnvelope>,
    tx_processing: Vec<TransactionResultMeta>,
    unknown_counter: u32,
}

impl LedgerBuilder {
    /// Empty ledger `sequence` closing at `1_700_000_000 + 5 * sequence`.
    pub fn new(sequence: u32) -> Self {
        Self {
            passphrase: TEST_PASSPHRASE.to_string(),
            header: LedgerHeader {
                ledger_seq: sequence,
                previous_ledger_hash: [0u8; 32],
                close_time: 1_700_000_000 + 5 * u64::from(sequence),
                base_fee: 100,
                base_reserve: 5_000_000,
                protocol_version: 21,
            },
            tx_set: Vec::new(),
            tx_processing: Vec::new(),
            unknown_counter: 0,
        }
    }

    /// Hash envelopes for `passphrase` instead of the test network.
    pub fn on_network(mut self, passphrase: &str) -> Self {
        self.passphrase = passphrase.to_string();
        self
    }

    pub fn with_close_time(mut self, close_time: u64) -> Self {
        self.header.close_time = close_time;
        self
    }

    pub fn with_base_fee(mut self, base_fee: u32) -> Self {
        self.header.base_fee = base_fee;
        self
    }

    /// Include `envelope` with a result of `code` charging `fee_charged`.
    pub fn with_transaction(
        mut self,
        envelope: TransactionEnvelope,
        code: TransactionResultCode,
        fee_charged: i64,
    ) -> Self {
        let hash = envelope
            .hash(&network_id(&self.passphrase))
            .expect("fixture envelopes always serialize");
        self.tx_set.push(envelope);
        self.tx_processing.push(TransactionResultMeta {
            transaction_hash: hash,
            result: TransactionResult { fee_charged, code },
        });
        self
    }

    /// Include `envelope` as successfully applied. Fee-bumps get the
    /// inner-success code.
    pub fn with_success(self, envelope: TransactionEnvelope, fee_charged: i64) -> Self {
        let code = match envelope.envelope_type() {
            EnvelopeType::TxFeeBump => TransactionResultCode::TxFeeBumpInnerSuccess,
            EnvelopeType::Tx | EnvelopeType::TxV0 => TransactionResultCode::TxSuccess,
        };
        self.with_transaction(envelope, code, fee_charged)
    }

    /// Include `envelope` as failed. Fee-bumps get the inner-failed code.
    pub fn with_failure(self, envelope: TransactionEnvelope, fee_charged: i64) -> Self {
        let code = match envelope.envelope_type() {
            EnvelopeType::TxFeeBump => TransactionResultCode::TxFeeBumpInnerFailed,
            EnvelopeType::Tx | EnvelopeType::TxV0 => TransactionResultCode::TxFailed,
        };
        self.with_transaction(envelope, code, fee_charged)
    }

    /// Add a processing result whose envelope is missing from the tx set.
    pub fn with_unknown_result(mut self, fee_charged: i64) -> Self {
        self.unknown_counter += 1;
        let mut hasher = Sha256::new();
        hasher.update(b"missing-envelope");
        hasher.update(self.header.ledger_seq.to_be_bytes());
        hasher.update(self.unknown_counter.to_be_bytes());
        self.tx_processing.push(TransactionResultMeta {
            transaction_hash: hasher.finalize().into(),
            result: TransactionResult {
                fee_charged,
                code: TransactionResultCode::TxSuccess,
            },
        });
        self
    }

    pub fn build(self) -> LedgerCloseMeta {
        let mut ledger_hasher = Sha256::new();
        ledger_hasher.update(self.header.ledger_seq.to_be_bytes());
        ledger_hasher.update(self.header.close_time.to_be_bytes());

        LedgerCloseMeta {
            version: 1,
            header: self.header,
            ledger_hash: ledger_hasher.finalize().into(),
            tx_set: self.tx_set,
            tx_processing: self.tx_processing,
        }
    }
}
