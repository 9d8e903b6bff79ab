/// Transaction types for the ledger
use crate::crypto::{self, PrivateKey};
use serde::{Deserialize, Serialize};

/// A signed transfer of `amount` from `source` to `recipient`.
///
/// Keys and signature are kept in their hex boundary encoding so that a
/// transaction received from outside can be validated as-is, malformed
/// fields included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Compressed public key of the sender (hex)
    pub source: String,
    /// Compressed public key of the recipient (hex)
    pub recipient: String,
    pub amount: i64,
    /// Compact signature over [`Transaction::signable_message`] (hex)
    pub signature: String,
}

impl Transaction {
    /// Builds and signs a transaction from the holder of `private_key`.
    pub fn new_signed(private_key: &PrivateKey, recipient: &str, amount: i64) -> Self {
        let source = private_key.public_key().to_hex();
        let payload = Self::payload(&source, recipient, amount);
        let signature = crypto::sign(private_key, payload.as_bytes()).to_hex();
        Transaction {
            source,
            recipient: recipient.to_string(),
            amount,
            signature,
        }
    }

    /// `source || recipient || amount` with no delimiters, amount in decimal.
    pub fn payload(source: &str, recipient: &str, amount: i64) -> String {
        format!("{}{}{}", source, recipient, amount)
    }

    pub fn signable_message(&self) -> Vec<u8> {
        Self::payload(&self.source, &self.recipient, self.amount).into_bytes()
    }
}
