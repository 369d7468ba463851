//! IPC Payloads for the Latest-Ledger processor
//!
//! Messages exchanged with the host pipeline: ledgers come in, JSON-encoded
//! `LatestLedger` records go out to registered consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::LedgerCloseMeta;
use uuid::Uuid;

/// Value of [`MessageMetadata::source`] on every forwarded message.
pub const SOURCE: &str = "latest-ledger-processor";

/// Value of [`MessageMetadata::data_type`] on every forwarded message.
pub const DATA_TYPE: &str = "latest_ledger";

// ============================================================
// INCOMING MESSAGES
// ============================================================

/// What a pipeline message carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// A decoded ledger close meta.
    Ledger(Box<LedgerCloseMeta>),
    /// Already-encoded JSON produced by another stage.
    Json(Vec<u8>),
}

impl Payload {
    /// Name used in "unexpected payload" errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ledger(_) => "LedgerCloseMeta",
            Self::Json(_) => "Json",
        }
    }
}

/// Message delivered to the processor by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub payload: Payload,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    /// Wrap a ledger, stamped now.
    pub fn ledger(meta: LedgerCloseMeta) -> Self {
        Self {
            payload: Payload::Ledger(Box::new(meta)),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================
// OUTGOING MESSAGES
// ============================================================

/// Routing metadata attached to every forwarded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub ledger_sequence: u32,
    pub source: String,
    pub data_type: String,
}

impl MessageMetadata {
    pub fn for_ledger(ledger_sequence: u32) -> Self {
        Self {
            ledger_sequence,
            source: SOURCE.to_string(),
            data_type: DATA_TYPE.to_string(),
        }
    }
}

/// JSON-encoded `LatestLedger` handed to downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardMessage {
    pub message_id: Uuid,
    /// `LatestLedger::to_json` output.
    pub payload: Vec<u8>,
    /// Timestamp of the inbound message this record was produced from.
    pub timestamp: DateTime<Utc>,
    pub metadata: MessageMetadata,
}
