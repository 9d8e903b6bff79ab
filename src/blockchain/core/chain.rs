use crate::blockchain::core::block::Block;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Blocks in order, genesis first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockchain {
    pub blocks: Vec<Block>,
}

impl Blockchain {
    /// An empty chain. Not valid until a genesis block is pushed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genesis(transactions: Vec<Transaction>) -> Self {
        Blockchain {
            blocks: vec![Block::genesis(transactions, 0)],
        }
    }

    /// Appends a block linked to the current tip, or a genesis block when
    /// the chain is empty. Returns the new block.
    pub fn push_block(&mut self, transactions: Vec<Transaction>, nonce: u64) -> &Block {
        let previous_hash = self.tip().map(|block| block.hash.clone());
        self.blocks.push(Block::new(transactions, previous_hash, nonce));
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
