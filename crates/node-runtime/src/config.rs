//! Runtime configuration loading.

use std::path::Path;

use anyhow::{Context, Result};
use fp_01_latest_ledger::config::NETWORK_PASSPHRASE_ENV;
use fp_01_latest_ledger::ProcessorConfig;
use tracing::info;

/// Load the processor configuration.
///
/// A config file, when given, takes precedence over `FP_NETWORK_PASSPHRASE`.
pub fn load_config(path: Option<&Path>) -> Result<ProcessorConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let config = ProcessorConfig::from_json(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            let config = ProcessorConfig::from_env()
                .with_context(|| format!("{} is not set", NETWORK_PASSPHRASE_ENV))?;
            info!("Loaded config from environment");
            Ok(config)
        }
    }
}
