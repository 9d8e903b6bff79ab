//! Integrity predicates over transactions, blocks and chains.
//!
//! Every predicate is total: malformed or tampered data yields `false`
//! rather than an error. The `check_*` variants report the first reason
//! a value was rejected.

use crate::blockchain::core::block::Block;
use crate::blockchain::core::chain::Blockchain;
use crate::crypto::verify_hex;
use crate::transaction::Transaction;
use thiserror::Error;
use tracing::debug;

/// Why a transaction, block or chain failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("negative amount {0}")]
    NegativeAmount(i64),

    #[error("signature does not verify against the source key")]
    BadSignature,

    #[error("block hash {stored} does not match recomputed {computed}")]
    HashMismatch { stored: String, computed: String },

    #[error("transaction {index} is invalid: {reason}")]
    InvalidTransaction { index: usize, reason: Box<Rejection> },

    #[error("chain has no blocks")]
    EmptyChain,

    #[error("genesis block has a previous hash")]
    GenesisHasPredecessor,

    #[error("block {index} is invalid: {reason}")]
    InvalidBlock { index: usize, reason: Box<Rejection> },

    #[error("block {index} does not link to the hash of its predecessor")]
    BrokenLink { index: usize },
}

pub fn check_transaction(tx: &Transaction) -> Result<(), Rejection> {
    if tx.amount < 0 {
        return Err(Rejection::NegativeAmount(tx.amount));
    }
    if !verify_hex(&tx.source, &tx.signable_message(), &tx.signature) {
        return Err(Rejection::BadSignature);
    }
    Ok(())
}

pub fn check_block(block: &Block) -> Result<(), Rejection> {
    let computed = block.calculate_hash();
    if computed != block.hash {
        return Err(Rejection::HashMismatch {
            stored: block.hash.clone(),
            computed,
        });
    }
    block
        .transactions
        .iter()
        .enumerate()
        .try_for_each(|(index, tx)| {
            check_transaction(tx).map_err(|reason| Rejection::InvalidTransaction {
                index,
                reason: Box::new(reason),
            })
        })
}

pub fn check_chain(chain: &Blockchain) -> Result<(), Rejection> {
    let genesis = chain.blocks.first().ok_or(Rejection::EmptyChain)?;
    if genesis.previous_hash.is_some() {
        return Err(Rejection::GenesisHasPredecessor);
    }

    for (index, block) in chain.blocks.iter().enumerate() {
        check_block(block).map_err(|reason| Rejection::InvalidBlock {
            index,
            reason: Box::new(reason),
        })?;

        if index > 0 && block.previous_hash.as_deref() != Some(chain.blocks[index - 1].hash.as_str())
        {
            return Err(Rejection::BrokenLink { index });
        }
    }
    Ok(())
}

pub fn is_valid_transaction(tx: &Transaction) -> bool {
    match check_transaction(tx) {
        Ok(()) => true,
        Err(reason) => {
            debug!(source = %tx.source, %reason, "transaction rejected");
            false
        }
    }
}

pub fn is_valid_block(block: &Block) -> bool {
    match check_block(block) {
        Ok(()) => true,
        Err(reason) => {
            debug!(hash = %block.hash, %reason, "block rejected");
            false
        }
    }
}

pub fn is_valid_chain(chain: &Blockchain) -> bool {
    match check_chain(chain) {
        Ok(()) => true,
        Err(reason) => {
            debug!(blocks = chain.len(), %reason, "chain rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    fn signed_tx(amount: i64) -> Transaction {
        let sender = KeyPair::generate().unwrap();
        let recipient = KeyPair::generate().unwrap();
        Transaction::new_signed(&sender.private_key, &recipient.public_key.to_hex(), amount)
    }

    fn valid_chain(blocks: usize) -> Blockchain {
        let mut chain = Blockchain::new();
        for nonce in 0..blocks as u64 {
            chain.push_block(vec![signed_tx(10), signed_tx(0)], nonce);
        }
        chain
    }

    #[test]
    fn test_valid_transaction() {
        assert!(is_valid_transaction(&signed_tx(10)));
        assert!(is_valid_transaction(&signed_tx(0)));
    }

    #[test]
    fn test_negative_amount_rejected_even_when_signed() {
        let tx = signed_tx(-5);
        assert_eq!(check_transaction(&tx), Err(Rejection::NegativeAmount(-5)));
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn test_altered_fields_break_signature() {
        let tx = signed_tx(10);

        let mut altered = tx.clone();
        altered.amount = 11;
        assert_eq!(check_transaction(&altered), Err(Rejection::BadSignature));

        let mut altered = tx.clone();
        altered.recipient = KeyPair::generate().unwrap().public_key.to_hex();
        assert!(!is_valid_transaction(&altered));

        // Swapping the source also swaps the verification key
        let mut altered = tx;
        altered.source = KeyPair::generate().unwrap().public_key.to_hex();
        assert!(!is_valid_transaction(&altered));
    }

    #[test]
    fn test_malformed_transaction_is_false() {
        let mut tx = signed_tx(1);
        tx.signature = "42".to_string();
        assert!(!is_valid_transaction(&tx));

        let mut tx = signed_tx(1);
        tx.source = String::new();
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn test_valid_block() {
        let block = Block::genesis(vec![signed_tx(1), signed_tx(2)], 0);
        assert!(is_valid_block(&block));
        assert!(is_valid_block(&Block::genesis(vec![], 0)));
    }

    #[test]
    fn test_block_hash_tampering() {
        let mut block = Block::genesis(vec![signed_tx(1)], 0);
        let first = block.hash.remove(0);
        block.hash.insert(0, if first == '0' { '1' } else { '0' });
        assert!(matches!(
            check_block(&block),
            Err(Rejection::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_block_signature_swap_breaks_hash() {
        let mut block = Block::genesis(vec![signed_tx(1)], 0);
        block.transactions[0].signature = signed_tx(1).signature;
        assert!(!is_valid_block(&block));
    }

    #[test]
    fn test_block_with_invalid_transaction() {
        let mut tx = signed_tx(3);
        tx.amount = 4;
        // Hash is computed over the tampered content, so only the
        // transaction check can catch it.
        let block = Block::genesis(vec![signed_tx(1), tx], 0);
        assert_eq!(
            check_block(&block),
            Err(Rejection::InvalidTransaction {
                index: 1,
                reason: Box::new(Rejection::BadSignature),
            })
        );
    }

    #[test]
    fn test_block_nonce_and_link_are_hashed() {
        let mut block = Block::new(vec![signed_tx(1)], Some("ab".repeat(32)), 9);
        block.nonce = 10;
        assert!(!is_valid_block(&block));

        let mut block = Block::new(vec![signed_tx(1)], Some("ab".repeat(32)), 9);
        block.previous_hash = None;
        assert!(!is_valid_block(&block));
    }

    #[test]
    fn test_valid_chain() {
        assert!(is_valid_chain(&valid_chain(1)));
        assert!(is_valid_chain(&valid_chain(4)));
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert_eq!(check_chain(&Blockchain::new()), Err(Rejection::EmptyChain));
    }

    #[test]
    fn test_genesis_with_predecessor_rejected() {
        let chain = Blockchain {
            blocks: vec![Block::new(vec![signed_tx(1)], Some("00".repeat(32)), 0)],
        };
        assert!(is_valid_block(&chain.blocks[0]));
        assert_eq!(check_chain(&chain), Err(Rejection::GenesisHasPredecessor));
    }

    #[test]
    fn test_unrelated_previous_hash_rejected() {
        let mut chain = valid_chain(3);
        let txs = chain.blocks[2].transactions.clone();
        chain.blocks[2] = Block::new(txs, Some(crate::crypto::sha256_hex(b"elsewhere")), 2);

        assert!(is_valid_block(&chain.blocks[2]));
        assert_eq!(check_chain(&chain), Err(Rejection::BrokenLink { index: 2 }));
    }

    #[test]
    fn test_second_null_previous_hash_rejected() {
        let mut chain = valid_chain(2);
        chain.blocks[1] = Block::genesis(chain.blocks[1].transactions.clone(), 1);
        assert!(is_valid_block(&chain.blocks[1]));
        assert_eq!(check_chain(&chain), Err(Rejection::BrokenLink { index: 1 }));
    }

    #[test]
    fn test_invalid_block_in_chain() {
        let mut chain = valid_chain(3);
        chain.blocks[1].nonce += 1;
        assert!(matches!(
            check_chain(&chain),
            Err(Rejection::InvalidBlock { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::BrokenLink { index: 3 }.to_string(),
            "block 3 does not link to the hash of its predecessor"
        );
        let nested = Rejection::InvalidBlock {
            index: 0,
            reason: Box::new(Rejection::NegativeAmount(-1)),
        };
        assert_eq!(nested.to_string(), "block 0 is invalid: negative amount -1");
    }
}
