//! Configuration for the Latest-Ledger processor

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::ConfigError;

/// Environment variable read by [`ProcessorConfig::from_env`].
pub const NETWORK_PASSPHRASE_ENV: &str = "FP_NETWORK_PASSPHRASE";

/// Processor configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Passphrase of the network the ledgers belong to. Required.
    pub network_passphrase: String,
}

impl ProcessorConfig {
    /// Validated configuration for `network_passphrase`.
    pub fn new(network_passphrase: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            network_passphrase: network_passphrase.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document such as `{"network_passphrase": "..."}`.
    pub fn from_json(config_json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(config_json)?;
        match value {
            Value::Object(map) => Self::from_map(&map),
            _ => Err(ConfigError::Parse("config must be a JSON object".to_string())),
        }
    }

    /// Read from a loosely typed host configuration map.
    pub fn from_map(config: &Map<String, Value>) -> Result<Self, ConfigError> {
        match config.get("network_passphrase") {
            None | Some(Value::Null) => Err(ConfigError::MissingNetworkPassphrase),
            Some(Value::String(passphrase)) => Self::new(passphrase.as_str()),
            Some(other) => Err(ConfigError::InvalidNetworkPassphrase {
                found: json_type_name(other),
            }),
        }
    }

    /// Read from `FP_NETWORK_PASSPHRASE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(NETWORK_PASSPHRASE_ENV) {
            Ok(passphrase) => Self::new(passphrase),
            Err(_) => Err(ConfigError::MissingNetworkPassphrase),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network_passphrase.trim().is_empty() {
            return Err(ConfigError::MissingNetworkPassphrase);
        }
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
