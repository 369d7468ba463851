//! # Flow Processor Node
//!
//! Streams decoded ledgers through the latest-ledger processor.
//!
//! ```text
//! ledgers.jsonl ──→ LatestLedgerHandler ──→ JsonLinesConsumer ──→ stdout
//! ```
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fp_01_latest_ledger::LatestLedgerHandler;
use node_runtime::{load_config, run_stream, JsonLinesConsumer};

/// Latest-ledger metrics over a stream of ledger close metas
#[derive(Parser, Debug)]
#[command(name = "fp-node")]
#[command(about = "Summarize each ledger of a JSON-lines stream into a LatestLedger record")]
struct Args {
    /// JSON config file with `network_passphrase` (default: FP_NETWORK_PASSPHRASE)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-lines file of ledger close metas (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(args.config.as_deref())?;

    let mut handler = LatestLedgerHandler::new(config)?;
    handler.register_consumer(Arc::new(JsonLinesConsumer::stdout()));

    info!(
        "Starting {} v{}",
        LatestLedgerHandler::NAME,
        LatestLedgerHandler::VERSION
    );

    let summary = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening input {}", path.display()))?;
            run_stream(&mut handler, BufReader::new(file)).await?
        }
        None => run_stream(&mut handler, BufReader::new(tokio::io::stdin())).await?,
    };

    info!(
        processed = summary.processed,
        failed = summary.failed + summary.malformed,
        "Shutdown complete"
    );

    Ok(())
}
