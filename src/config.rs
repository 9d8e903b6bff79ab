//! Configuration management for the ledger demo and logging

use crate::error::{ChainError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// File read by [`load_config`] when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "ledger.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(&self.level)
            .map_err(|_| ChainError::Config(format!("Unknown log level '{}'", self.level)))
    }
}

/// Shape of the chain built by the demo binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_blocks")]
    pub blocks: usize,
    #[serde(default = "default_transactions_per_block")]
    pub transactions_per_block: usize,
    #[serde(default = "default_amount")]
    pub amount: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            blocks: default_blocks(),
            transactions_per_block: default_transactions_per_block(),
            amount: default_amount(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_blocks() -> usize {
    3
}

fn default_transactions_per_block() -> usize {
    2
}

fn default_amount() -> i64 {
    10
}

impl Config {
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.logging.max_level()?;
        if self.demo.blocks == 0 {
            return Err(ChainError::Config("demo.blocks must be at least 1".into()));
        }
        if self.demo.transactions_per_block == 0 {
            return Err(ChainError::Config(
                "demo.transactions_per_block must be at least 1".into(),
            ));
        }
        if self.demo.amount < 0 {
            return Err(ChainError::Config("demo.amount cannot be negative".into()));
        }
        Ok(())
    }
}

/// Loads `path`, falling back to defaults when the file does not exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::from_toml_str(&fs::read_to_string(path)?)
}

pub fn load_config() -> Result<Config> {
    load_config_from(DEFAULT_CONFIG_PATH)
}
