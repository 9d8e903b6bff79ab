//! Error types for the ledger core

use thiserror::Error;

/// Failures raised by signing, key handling and configuration.
///
/// Validation never produces a `ChainError`: an invalid transaction, block
/// or chain is an ordinary `false` (see [`crate::validation`]).
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Entropy exhausted: {0}")]
    EntropyExhausted(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
