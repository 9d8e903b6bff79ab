//! Chain corruption for adversarial test fixtures.
//!
//! Only compiled for tests or with the `test-utils` feature; it has no place
//! on the production validation interface.

use crate::blockchain::Blockchain;
use rand::Rng;
use tracing::debug;

/// Where [`break_chain`] wrote its garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TamperSite {
    pub block: usize,
    pub transaction: usize,
}

/// Overwrites the signature of one random transaction in one random block
/// with a small decimal number. Blocks without transactions are never
/// picked. Returns `None`, leaving the chain untouched, when the chain
/// holds no transactions at all.
pub fn break_chain<R: Rng + ?Sized>(chain: &mut Blockchain, rng: &mut R) -> Option<TamperSite> {
    let candidates: Vec<usize> = chain
        .blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| !block.transactions.is_empty())
        .map(|(index, _)| index)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let block = candidates[rng.gen_range(0..candidates.len())];
    let transactions = &mut chain.blocks[block].transactions;
    let transaction = rng.gen_range(0..transactions.len());
    // A decimal below 100 is at most 2 characters and can never equal a
    // 128 character signature, so the block hash always changes.
    transactions[transaction].signature = rng.gen_range(0..100u32).to_string();

    debug!(block, transaction, "tampered with chain");
    Some(TamperSite { block, transaction })
}
