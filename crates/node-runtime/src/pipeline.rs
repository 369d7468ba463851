//! JSON-lines ledger stream.
//!
//! Each non-empty input line is one `LedgerCloseMeta` encoded as JSON. A line
//! that fails to parse or a ledger that fails to decode is logged and counted;
//! the stream continues with the next line.

use anyhow::{Context, Result};
use fp_01_latest_ledger::{InboundMessage, LatestLedgerHandler};
use shared_types::LedgerCloseMeta;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// Totals for one run over an input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: u64,
    pub malformed: u64,
    pub failed: u64,
}

/// Feed every ledger in `input` through `handler` until end of input.
///
/// Only I/O errors on `input` end the run early.
pub async fn run_stream<R>(handler: &mut LatestLedgerHandler, input: R) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = RunSummary::default();
    let mut lines = input.lines();
    let mut line_number = 0u64;

    while let Some(line) = lines.next_line().await.context("reading ledger input")? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let meta: LedgerCloseMeta = match serde_json::from_str(&line) {
            Ok(meta) => meta,
            Err(e) => {
                warn!(line = line_number, error = %e, "Skipping malformed ledger line");
                summary.malformed += 1;
                continue;
            }
        };

        match handler.process(InboundMessage::ledger(meta)).await {
            Ok(_) => summary.processed += 1,
            Err(_) => summary.failed += 1,
        }
    }

    info!(
        processed = summary.processed,
        malformed = summary.malformed,
        failed = summary.failed,
        "Input exhausted"
    );
    Ok(summary)
}
