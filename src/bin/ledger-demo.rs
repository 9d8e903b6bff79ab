#![forbid(unsafe_code)]
use std::env;
use keychain_ledger::blockchain::{check_chain, is_valid_block, is_valid_chain, Block, Blockchain};
use keychain_ledger::config::{load_config, load_config_from};
use keychain_ledger::crypto::{sha256_hex, KeyPair};
use keychain_ledger::transaction::Transaction;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match env::args().nth(1) {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level()?)
        .init();

    let parties = (0..config.demo.transactions_per_block + 1)
        .map(|_| KeyPair::generate())
        .collect::<Result<Vec<_>, _>>()?;

    let mut chain = Blockchain::new();
    for nonce in 0..config.demo.blocks as u64 {
        let transactions = parties
            .windows(2)
            .map(|pair| {
                Transaction::new_signed(
                    &pair[0].private_key,
                    &pair[1].public_key.to_hex(),
                    config.demo.amount,
                )
            })
            .collect();
        let block = chain.push_block(transactions, nonce);
        info!(nonce, hash = %block.hash, "appended block");
    }

    info!(blocks = chain.len(), valid = is_valid_chain(&chain), "built chain");
    println!("{}", serde_json::to_string_pretty(&chain)?);

    // Rewriting an amount after signing must be caught by validation.
    let mut tampered = chain.clone();
    let tx = &mut tampered.blocks[0].transactions[0];
    tx.amount = -tx.amount - 1;
    match check_chain(&tampered) {
        Ok(()) => warn!("tampered amount went unnoticed"),
        Err(reason) => info!(%reason, "tampered amount rejected"),
    }

    // Relinking a block to an unrelated hash leaves the block itself valid.
    if chain.len() > 1 {
        let mut relinked = chain.clone();
        let transactions = relinked.blocks[1].transactions.clone();
        let nonce = relinked.blocks[1].nonce;
        relinked.blocks[1] = Block::new(transactions, Some(sha256_hex(b"unrelated")), nonce);
        info!(
            block_valid = is_valid_block(&relinked.blocks[1]),
            chain_valid = is_valid_chain(&relinked),
            "relinked block 1"
        );
    }

    Ok(())
}
