//! IPC Handler for the Latest-Ledger processor
//!
//! Plugs the processor into the host pipeline.
//!
//! ## Message Flow
//!
//! - Accept: `Payload::Ledger` ONLY
//! - Send: JSON `LatestLedger` to every registered consumer
//! - A failing consumer is logged and skipped

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::adapters::{query_definitions, schema_definition};
use crate::application::service::LatestLedgerProcessor;
use crate::config::ProcessorConfig;
use crate::domain::errors::{ConfigError, HandlerError};
use crate::ipc::payloads::{ForwardMessage, InboundMessage, MessageMetadata, Payload};
use crate::ports::inbound::LatestLedgerApi;
use crate::ports::outbound::LedgerConsumer;

/// IPC Handler for the Latest-Ledger processor.
///
/// Validates the inbound payload and delegates to the processor service.
pub struct LatestLedgerHandler {
    processor: LatestLedgerProcessor,
    consumers: Vec<Arc<dyn LedgerConsumer>>,
}

impl LatestLedgerHandler {
    /// Name the host registers this processor under.
    pub const NAME: &'static str = "flow/processor/latest-ledger";
    pub const VERSION: &'static str = "1.0.0";

    /// Create a handler for a validated configuration.
    pub fn new(config: ProcessorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            processor: LatestLedgerProcessor::new(config)?,
            consumers: Vec::new(),
        })
    }

    /// Create a handler from the host's loosely typed configuration map.
    ///
    /// Requires a string `network_passphrase` entry.
    pub fn initialize(config: &Map<String, Value>) -> Result<Self, ConfigError> {
        let config = ProcessorConfig::from_map(config)?;
        info!(
            "[fp-01] Initialized {} v{} for network {:?}",
            Self::NAME,
            Self::VERSION,
            config.network_passphrase
        );
        Self::new(config)
    }

    /// Add a downstream consumer. Consumers receive messages in registration order.
    pub fn register_consumer(&mut self, consumer: Arc<dyn LedgerConsumer>) {
        info!("[fp-01] Registering consumer {}", consumer.name());
        self.consumers.push(consumer);
    }

    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Handle one inbound message.
    ///
    /// Returns the forwarded message so callers without consumers still see
    /// the record. Consumer failures never fail the message.
    pub async fn process(&mut self, message: InboundMessage) -> Result<ForwardMessage, HandlerError> {
        let InboundMessage { payload, timestamp } = message;

        let meta = match payload {
            Payload::Ledger(meta) => meta,
            other => {
                warn!("[fp-01] Rejected payload of kind {}", other.kind());
                return Err(HandlerError::UnexpectedPayload { found: other.kind() });
            }
        };

        info!(
            "[fp-01] Processing ledger {} with {} consumers",
            meta.sequence(),
            self.consumers.len()
        );

        let ledger = match self.processor.process_ledger(&meta) {
            Ok(ledger) => ledger,
            Err(e) => {
                error!("[fp-01] ❌ Ledger {} failed: {}", e.sequence(), e);
                return Err(e.into());
            }
        };

        let forward = ForwardMessage {
            message_id: Uuid::new_v4(),
            payload: ledger.to_json()?,
            timestamp,
            metadata: MessageMetadata::for_ledger(ledger.sequence),
        };

        for consumer in &self.consumers {
            if let Err(e) = consumer.consume(&forward).await {
                warn!("[fp-01] Error in consumer {}: {}", consumer.name(), e);
            }
        }

        info!(
            "[fp-01] ✓ Forwarded ledger {} ({} transactions, {:.2} tps)",
            ledger.sequence, ledger.transaction_count, ledger.transactions_per_second
        );

        Ok(forward)
    }

    pub fn schema_definition(&self) -> &'static str {
        schema_definition()
    }

    pub fn query_definitions(&self) -> &'static str {
        query_definitions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LatestLedger;
    use crate::ports::outbound::mocks::{FailingConsumer, RecordingConsumer};
    use serde_json::json;
    use shared_types::fixtures::{plain_tx, LedgerBuilder, TEST_PASSPHRASE};

    fn make_handler() -> LatestLedgerHandler {
        let config = json!({ "network_passphrase": TEST_PASSPHRASE });
        LatestLedgerHandler::initialize(config.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_initialize_requires_passphrase() {
        let err = LatestLedgerHandler::initialize(&Map::new()).err().unwrap();
        assert_eq!(err.to_string(), "missing network_passphrase in config");
    }

    #[tokio::test]
    async fn test_reject_unexpected_payload() {
        let mut handler = make_handler();
        let message = InboundMessage {
            payload: Payload::Json(b"{}".to_vec()),
            timestamp: chrono::Utc::now(),
        };

        let err = handler.process(message).await.unwrap_err();
        assert!(matches!(err, HandlerError::UnexpectedPayload { found: "Json" }));
    }

    #[tokio::test]
    async fn test_forward_to_consumers() {
        let mut handler = make_handler();
        let recorder = Arc::new(RecordingConsumer::default());
        handler.register_consumer(recorder.clone());

        let meta = LedgerBuilder::new(12).with_success(plain_tx(1, 2), 200).build();
        let message = InboundMessage::ledger(meta);
        let timestamp = message.timestamp;

        let forward = handler.process(message).await.unwrap();

        assert_eq!(forward.timestamp, timestamp);
        assert_eq!(forward.metadata, MessageMetadata::for_ledger(12));

        let received = recorder.received.lock().await;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message_id, forward.message_id);

        let record: LatestLedger = serde_json::from_slice(&received[0].payload).unwrap();
        assert_eq!(record.sequence, 12);
        assert_eq!(record.successful_operation_count, 2);
    }

    #[tokio::test]
    async fn test_consumer_failure_does_not_fail_message() {
        let mut handler = make_handler();
        let recorder = Arc::new(RecordingConsumer::default());
        handler.register_consumer(Arc::new(FailingConsumer));
        handler.register_consumer(recorder.clone());

        let meta = LedgerBuilder::new(3).build();
        assert!(handler.process(InboundMessage::ledger(meta)).await.is_ok());
        assert_eq!(recorder.received.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_decode_failure_reaches_caller() {
        let mut handler = make_handler();
        let recorder = Arc::new(RecordingConsumer::default());
        handler.register_consumer(recorder.clone());

        let mut meta = LedgerBuilder::new(3).build();
        meta.version = 9;

        let err = handler.process(InboundMessage::ledger(meta)).await.unwrap_err();
        assert!(matches!(err, HandlerError::Decode(_)));
        assert!(recorder.received.lock().await.is_empty());
    }

    #[test]
    fn test_schema_passthrough() {
        let handler = make_handler();
        assert!(handler.schema_definition().contains("type LatestLedger"));
        assert!(handler.query_definitions().contains("latestLedger"));
    }
}
