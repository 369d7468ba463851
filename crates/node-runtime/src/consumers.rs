//! Output consumers for forwarded records.

use std::io::Write;

use async_trait::async_trait;
use fp_01_latest_ledger::{ConsumerError, ForwardMessage, LedgerConsumer};
use parking_lot::Mutex;

/// Writes each forwarded record as one line of JSON.
pub struct JsonLinesConsumer<W: Write + Send + 'static> {
    writer: Mutex<W>,
}

impl JsonLinesConsumer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> JsonLinesConsumer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_line(&self, payload: &[u8]) -> std::io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(payload)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

#[async_trait]
impl<W: Write + Send + 'static> LedgerConsumer for JsonLinesConsumer<W> {
    fn name(&self) -> &str {
        "json-lines"
    }

    async fn consume(&self, message: &ForwardMessage) -> Result<(), ConsumerError> {
        self.write_line(&message.payload).map_err(|e| ConsumerError {
            consumer: self.name().to_string(),
            reason: e.to_string(),
        })
    }
}
