use crate::crypto::sha256_hex;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Text standing in for an absent predecessor in the hash payload.
pub const NULL_PREVIOUS_HASH: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub transactions: Vec<Transaction>,
    /// `None` only for the genesis block
    pub previous_hash: Option<String>,
    pub nonce: u64,
    /// SHA-256 of [`Block::hash_payload`] (hex)
    pub hash: String,
}

impl Block {
    pub fn new(transactions: Vec<Transaction>, previous_hash: Option<String>, nonce: u64) -> Self {
        let hash = sha256_hex(
            Self::hash_payload(&transactions, previous_hash.as_deref(), nonce).as_bytes(),
        );
        Block {
            transactions,
            previous_hash,
            nonce,
            hash,
        }
    }

    pub fn genesis(transactions: Vec<Transaction>, nonce: u64) -> Self {
        Self::new(transactions, None, nonce)
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_none()
    }

    /// Every transaction signature in order, then the previous hash, then
    /// the nonce in decimal. No delimiters anywhere.
    pub fn hash_payload(
        transactions: &[Transaction],
        previous_hash: Option<&str>,
        nonce: u64,
    ) -> String {
        let mut payload: String = transactions
            .iter()
            .map(|tx| tx.signature.as_str())
            .collect();
        payload.push_str(previous_hash.unwrap_or(NULL_PREVIOUS_HASH));
        payload.push_str(&nonce.to_string());
        payload
    }

    /// Recomputes the hash from the block's current contents.
    pub fn calculate_hash(&self) -> String {
        sha256_hex(
            Self::hash_payload(&self.transactions, self.previous_hash.as_deref(), self.nonce)
                .as_bytes(),
        )
    }
}
