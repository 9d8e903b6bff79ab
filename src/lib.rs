//! Keychain Ledger - signing primitives and integrity validation for a
//! minimal secp256k1 blockchain
//!
//! # Architecture
//!
//! ## Cryptography
//! - [`crypto`] - Key generation, signing and verification (secp256k1 over SHA-256)
//!
//! ## Core Blockchain
//! - [`transaction`] - Transaction type and signed payload reconstruction
//! - [`blockchain`] - Blocks, chains and their validation predicates
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - `tamper` - Chain corruption for test fixtures (`test-utils` feature)

#![forbid(unsafe_code)]

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Core Blockchain
// ============================================================================
pub mod blockchain;
pub mod transaction;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

// ============================================================================
// Test Fixtures
// ============================================================================
#[cfg(any(test, feature = "test-utils"))]
pub mod tamper;

pub use blockchain::{
    check_block, check_chain, check_transaction, is_valid_block, is_valid_chain,
    is_valid_transaction, Block, Blockchain, Rejection,
};
pub use crypto::{KeyPair, PrivateKey, PublicKey, Signature};
pub use error::{ChainError, Result};
pub use transaction::Transaction;
