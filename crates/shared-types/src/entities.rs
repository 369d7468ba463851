//! # Ledger Entities
//!
//! Decoded form of a ledger close event.
//!
//! ## Clusters
//!
//! - **Ledger**: `LedgerCloseMeta`, `LedgerHeader`
//! - **Envelopes**: `TransactionEnvelope` and its three arms
//! - **Transactions**: `Transaction`, `Operation`, `TransactionExt`
//! - **Results**: `TransactionResultMeta`, `TransactionResult`

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use sha2::{Digest, Sha256};

use crate::errors::ReaderError;

// =============================================================================
// CLUSTER A: THE LEDGER
// =============================================================================

/// A 32-byte SHA-256 hash.
pub type Hash = [u8; 32];

/// An ed25519 account public key.
pub type AccountId = [u8; 32];

/// Derive the network id used to scope transaction hashes.
///
/// The id is the SHA-256 of the network passphrase, so identical envelopes
/// hash differently on different networks.
pub fn network_id(passphrase: &str) -> Hash {
    Sha256::digest(passphrase.as_bytes()).into()
}

/// Header of a closed ledger.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHeader {
    /// Ledger sequence number.
    pub ledger_seq: u32,
    /// Hash of the previous ledger header.
    #[serde_as(as = "Hex")]
    pub previous_ledger_hash: Hash,
    /// Close time in unix seconds.
    pub close_time: u64,
    /// Base fee per operation, in stroops.
    pub base_fee: u32,
    /// Base reserve per ledger entry, in stroops.
    pub base_reserve: u32,
    /// Protocol version the ledger closed under.
    pub protocol_version: u32,
}

/// Everything emitted when a ledger closes.
///
/// `tx_set` holds envelopes in set order; `tx_processing` holds results in
/// apply order. The two are joined by transaction hash when reading.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerCloseMeta {
    /// Layout version of this meta.
    pub version: u8,
    /// Ledger header.
    pub header: LedgerHeader,
    /// Hash of the ledger header.
    #[serde_as(as = "Hex")]
    pub ledger_hash: Hash,
    /// Transaction envelopes included in the ledger.
    #[serde(default)]
    pub tx_set: Vec<TransactionEnvelope>,
    /// Processing results, one per applied transaction.
    #[serde(default)]
    pub tx_processing: Vec<TransactionResultMeta>,
}

impl LedgerCloseMeta {
    /// Ledger sequence number.
    pub fn sequence(&self) -> u32 {
        self.header.ledger_seq
    }

    /// Hex-encoded ledger hash.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.ledger_hash)
    }

    /// Base fee per operation.
    pub fn base_fee(&self) -> u32 {
        self.header.base_fee
    }

    /// Close time in unix seconds.
    pub fn close_time(&self) -> u64 {
        self.header.close_time
    }
}

// =============================================================================
// CLUSTER B: ENVELOPES
// =============================================================================

/// Envelope type discriminant, as mixed into transaction hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeType {
    TxV0,
    Tx,
    TxFeeBump,
}

impl EnvelopeType {
    /// Wire tag of the envelope type.
    pub fn tag(self) -> u32 {
        match self {
            Self::TxV0 => 0,
            Self::Tx => 2,
            Self::TxFeeBump => 5,
        }
    }
}

/// A signature with the hint of the key that produced it.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    /// Last four bytes of the signing key.
    #[serde_as(as = "Hex")]
    pub hint: [u8; 4],
    /// Raw signature bytes.
    #[serde_as(as = "Hex")]
    pub signature: Vec<u8>,
}

/// A signed transaction envelope.
///
/// Closed set of arms: new envelope kinds must be handled at every match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionEnvelope {
    /// Pre-protocol-13 plain transaction.
    TxV0(TransactionV0Envelope),
    /// Plain transaction.
    Tx(TransactionV1Envelope),
    /// Fee-bump wrapper around a plain transaction.
    FeeBump(FeeBumpTransactionEnvelope),
}

impl TransactionEnvelope {
    /// Envelope type of this envelope.
    pub fn envelope_type(&self) -> EnvelopeType {
        match self {
            Self::TxV0(_) => EnvelopeType::TxV0,
            Self::Tx(_) => EnvelopeType::Tx,
            Self::FeeBump(_) => EnvelopeType::TxFeeBump,
        }
    }

    /// Operations of the transaction. For fee-bumps these are the inner
    /// transaction's operations.
    pub fn operations(&self) -> &[Operation] {
        match self {
            Self::TxV0(env) => &env.tx.operations,
            Self::Tx(env) => &env.tx.operations,
            Self::FeeBump(env) => match &env.tx.inner_tx {
                FeeBumpInnerTx::Tx(inner) => &inner.tx.operations,
            },
        }
    }

    /// Network-scoped hash of the signed payload.
    ///
    /// `SHA-256(network_id || type_tag || payload)`. V0 envelopes hash as
    /// their v1 equivalent, so both encodings of one transaction share a hash.
    pub fn hash(&self, network_id: &Hash) -> Result<Hash, ReaderError> {
        let (envelope_type, payload) = match self {
            Self::TxV0(env) => (EnvelopeType::Tx, bincode::serialize(&env.tx.to_transaction())?),
            Self::Tx(env) => (EnvelopeType::Tx, bincode::serialize(&env.tx)?),
            Self::FeeBump(env) => (EnvelopeType::TxFeeBump, bincode::serialize(&env.tx)?),
        };

        let mut hasher = Sha256::new();
        hasher.update(network_id);
        hasher.update(envelope_type.tag().to_be_bytes());
        hasher.update(&payload);
        Ok(hasher.finalize().into())
    }
}

/// Envelope of a legacy plain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV0Envelope {
    pub tx: TransactionV0,
    #[serde(default)]
    pub signatures: Vec<DecoratedSignature>,
}

/// Envelope of a plain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV1Envelope {
    pub tx: Transaction,
    #[serde(default)]
    pub signatures: Vec<DecoratedSignature>,
}

/// Envelope of a fee-bump transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpTransactionEnvelope {
    pub tx: FeeBumpTransaction,
    #[serde(default)]
    pub signatures: Vec<DecoratedSignature>,
}

/// Re-submits an inner transaction with a fee paid by `fee_source`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpTransaction {
    /// Account paying the bumped fee.
    #[serde_as(as = "Hex")]
    pub fee_source: AccountId,
    /// Total fee the fee source is willing to pay.
    pub fee: i64,
    /// Wrapped transaction.
    pub inner_tx: FeeBumpInnerTx,
}

/// Transactions a fee-bump may wrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBumpInnerTx {
    Tx(TransactionV1Envelope),
}

// =============================================================================
// CLUSTER C: TRANSACTIONS
// =============================================================================

/// Legacy transaction body.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV0 {
    #[serde_as(as = "Hex")]
    pub source_account_ed25519: AccountId,
    pub fee: u32,
    pub seq_num: i64,
    pub operations: Vec<Operation>,
}

impl TransactionV0 {
    /// The v1 form of this transaction.
    pub fn to_transaction(&self) -> Transaction {
        Transaction {
            source_account: self.source_account_ed25519,
            fee: self.fee,
            seq_num: self.seq_num,
            operations: self.operations.clone(),
            ext: TransactionExt::V0,
        }
    }
}

/// Plain transaction body.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Account originating the transaction.
    #[serde_as(as = "Hex")]
    pub source_account: AccountId,
    /// Maximum fee the source will pay.
    pub fee: u32,
    /// Source account sequence number consumed.
    pub seq_num: i64,
    /// Operations applied in order.
    pub operations: Vec<Operation>,
    /// Extension carrying smart-contract resource data.
    #[serde(default)]
    pub ext: TransactionExt,
}

/// Transaction extension point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionExt {
    #[default]
    V0,
    /// Smart-contract transaction with its declared resources.
    V1(SorobanTransactionData),
}

impl TransactionExt {
    /// Smart-contract resource data, if this is a v1 extension.
    pub fn soroban_data(&self) -> Option<&SorobanTransactionData> {
        match self {
            Self::V0 => None,
            Self::V1(data) => Some(data),
        }
    }
}

/// Resources declared by a smart-contract transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorobanTransactionData {
    pub resources: SorobanResources,
    /// Portion of the fee reserved for resource consumption.
    pub resource_fee: i64,
}

/// Compute and IO limits of a smart-contract invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorobanResources {
    pub instructions: u32,
    pub read_bytes: u32,
    pub write_bytes: u32,
}

/// A single operation.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Overrides the transaction source for this operation.
    #[serde_as(as = "Option<Hex>")]
    pub source_account: Option<AccountId>,
    pub body: OperationBody,
}

/// Asset identifier.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    Native,
    Credit {
        code: String,
        #[serde_as(as = "Hex")]
        issuer: AccountId,
    },
}

/// Operation payloads.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationBody {
    CreateAccount {
        #[serde_as(as = "Hex")]
        destination: AccountId,
        starting_balance: i64,
    },
    Payment {
        #[serde_as(as = "Hex")]
        destination: AccountId,
        asset: Asset,
        amount: i64,
    },
    ManageData {
        name: String,
        value: Option<Vec<u8>>,
    },
    BumpSequence {
        bump_to: i64,
    },
    InvokeHostFunction {
        #[serde_as(as = "Hex")]
        contract_id: Hash,
        function_name: String,
    },
    ExtendFootprintTtl {
        extend_to: u32,
    },
    RestoreFootprint,
}

// =============================================================================
// CLUSTER D: RESULTS
// =============================================================================

/// Processing result of one transaction, keyed by its hash.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResultMeta {
    #[serde_as(as = "Hex")]
    pub transaction_hash: Hash,
    pub result: TransactionResult,
}

/// Outcome of applying a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// Fee actually charged, including for failed transactions.
    pub fee_charged: i64,
    pub code: TransactionResultCode,
}

impl TransactionResult {
    /// Whether the transaction (or the inner transaction of a fee-bump)
    /// was applied successfully.
    pub fn successful(&self) -> bool {
        self.code.is_success()
    }
}

/// Result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionResultCode {
    TxFeeBumpInnerSuccess,
    TxSuccess,
    TxFailed,
    TxTooEarly,
    TxTooLate,
    TxMissingOperation,
    TxBadSeq,
    TxBadAuth,
    TxInsufficientBalance,
    TxNoAccount,
    TxInsufficientFee,
    TxBadAuthExtra,
    TxInternalError,
    TxNotSupported,
    TxFeeBumpInnerFailed,
    TxBadSponsorship,
    TxBadMinSeqAgeOrGap,
    TxMalformed,
    TxSorobanInvalid,
}

impl TransactionResultCode {
    pub fn is_success(self) -> bool {
        matches!(self, Self::TxSuccess | Self::TxFeeBumpInnerSuccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fee_bump, legacy_tx, plain_tx, soroban_tx, TEST_PASSPHRASE};

    #[test]
    fn test_network_id_is_passphrase_digest() {
        let a = network_id(TEST_PASSPHRASE);
        let b = network_id("Public Global Stellar Network ; September 2015");
        assert_ne!(a, b);
        assert_eq!(a, network_id(TEST_PASSPHRASE));
    }

    #[test]
    fn test_hash_is_network_scoped() {
        let env = plain_tx(1, 2);
        let testnet = env.hash(&network_id(TEST_PASSPHRASE)).unwrap();
        let other = env.hash(&network_id("Standalone Network")).unwrap();
        assert_ne!(testnet, other);
    }

    #[test]
    fn test_v0_hashes_as_v1() {
        let legacy = legacy_tx(9, 1);
        let TransactionEnvelope::TxV0(v0) = &legacy else {
            panic!("expected v0 envelope");
        };
        let v1 = TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: v0.tx.to_transaction(),
            signatures: vec![],
        });

        let id = network_id(TEST_PASSPHRASE);
        assert_eq!(legacy.hash(&id).unwrap(), v1.hash(&id).unwrap());
    }

    #[test]
    fn test_fee_bump_hash_differs_from_inner() {
        let inner = plain_tx(3, 1);
        let bumped = fee_bump(inner.clone(), 1_000);
        let id = network_id(TEST_PASSPHRASE);
        assert_ne!(inner.hash(&id).unwrap(), bumped.hash(&id).unwrap());
    }

    #[test]
    fn test_fee_bump_operations_are_inner_operations() {
        let bumped = fee_bump(plain_tx(4, 3), 500);
        assert_eq!(bumped.operations().len(), 3);
        assert_eq!(bumped.envelope_type(), EnvelopeType::TxFeeBump);
    }

    #[test]
    fn test_soroban_data_only_on_v1_ext() {
        assert!(TransactionExt::V0.soroban_data().is_none());

        let TransactionEnvelope::Tx(env) = soroban_tx(5, 100, 2_000, 10, 20) else {
            panic!("expected v1 envelope");
        };
        let data = env.tx.ext.soroban_data().unwrap();
        assert_eq!(data.resource_fee, 100);
        assert_eq!(data.resources.instructions, 2_000);
    }

    #[test]
    fn test_successful_codes() {
        assert!(TransactionResultCode::TxSuccess.is_success());
        assert!(TransactionResultCode::TxFeeBumpInnerSuccess.is_success());
        assert!(!TransactionResultCode::TxFailed.is_success());
        assert!(!TransactionResultCode::TxFeeBumpInnerFailed.is_success());
        assert!(!TransactionResultCode::TxBadSeq.is_success());
    }

    #[test]
    fn test_envelope_json_shape() {
        let json = serde_json::to_value(plain_tx(1, 1)).unwrap();
        assert!(json.get("tx").is_some());
        assert!(json["tx"]["tx"]["source_account"].is_string());
    }
}
