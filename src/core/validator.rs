//! Integrity validation for transactions, blocks and chains
//!
//! Each check is a pure query over data already in memory and answers
//! `true` or `false`. A `false` carries no reason; the narrower checks
//! can be called directly to find which one failed. Rejections are
//! logged at debug level.

use crate::core::block::Block;
use crate::core::chain::Chain;
use crate::core::transaction::Transaction;
use crate::crypto::verify;

/// Check a single transaction.
///
/// Rejects negative amounts and signatures that do not verify against
/// `source` over the canonical message. Balances and distinct
/// source/recipient are not checked here.
pub fn is_valid_transaction(tx: &Transaction) -> bool {
    if tx.amount < 0 {
        log::debug!("Transaction rejected: negative amount {}", tx.amount);
        return false;
    }

    let message = tx.canonical_message();
    if !verify(&tx.source, message.as_bytes(), &tx.signature) {
        log::debug!("Transaction rejected: bad signature from {}", tx.source);
        return false;
    }

    true
}

/// Check a single block: the stored hash must match a recomputation over
/// the current fields, and every transaction must be valid.
pub fn is_valid_block(block: &Block) -> bool {
    if !block.verify_hash() {
        log::debug!("Block rejected: hash mismatch for {}", block.hash);
        return false;
    }

    if let Some(index) = block
        .transactions
        .iter()
        .position(|tx| !is_valid_transaction(tx))
    {
        log::debug!("Block rejected: invalid transaction at index {}", index);
        return false;
    }

    true
}

/// Check a whole chain.
///
/// In order: a genesis block exists and has no previous hash, each block
/// links to its predecessor's hash, every block is valid, and every
/// transaction across the chain is valid.
pub fn is_valid_chain(chain: &Chain) -> bool {
    let genesis = match chain.blocks.first() {
        Some(block) => block,
        None => {
            log::debug!("Chain rejected: no genesis block");
            return false;
        }
    };

    if genesis.previous_hash.is_some() {
        log::debug!("Chain rejected: genesis block has a previous hash");
        return false;
    }

    for (i, pair) in chain.blocks.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.previous_hash.as_deref() != Some(previous.hash.as_str()) {
            log::debug!("Chain rejected: block {} does not link to block {}", i + 1, i);
            return false;
        }
    }

    if let Some(index) = chain.blocks.iter().position(|b| !is_valid_block(b)) {
        log::debug!("Chain rejected: invalid block at height {}", index);
        return false;
    }

    if !chain.transactions().all(is_valid_transaction) {
        log::debug!("Chain rejected: invalid transaction");
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{generate_key_pair, KeyPair, Signature};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn key_pairs() -> (KeyPair, KeyPair) {
        (generate_key_pair().unwrap(), generate_key_pair().unwrap())
    }

    fn two_block_chain() -> (Chain, KeyPair, KeyPair) {
        let (alice, bob) = key_pairs();
        let genesis = Block::genesis(vec![Transaction::new(&alice, bob.public_key, 10)], 0);
        let next = Block::new(
            Some(genesis.hash.clone()),
            vec![Transaction::new(&bob, alice.public_key, 4)],
            1,
        );
        let chain = Chain {
            genesis_block: true,
            blocks: vec![genesis, next],
        };
        (chain, alice, bob)
    }

    #[test]
    fn test_valid_transaction() {
        init_logger();
        let (alice, bob) = key_pairs();
        assert!(is_valid_transaction(&Transaction::new(&alice, bob.public_key, 10)));
        assert!(is_valid_transaction(&Transaction::new(&alice, bob.public_key, 0)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        init_logger();
        let (alice, bob) = key_pairs();
        let tx = Transaction::new(&alice, bob.public_key, -1);
        // The signature itself is fine
        assert!(verify(&tx.source, tx.canonical_message().as_bytes(), &tx.signature));
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn test_modified_transaction_rejected() {
        init_logger();
        let (alice, bob) = key_pairs();

        let mut tx = Transaction::new(&alice, bob.public_key, 10);
        tx.amount = 11;
        assert!(!is_valid_transaction(&tx));

        let mut tx = Transaction::new(&alice, bob.public_key, 10);
        tx.recipient = alice.public_key;
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn test_signed_by_wrong_key_rejected() {
        init_logger();
        let (alice, bob) = key_pairs();
        let mut tx = Transaction::new(&bob, bob.public_key, 10);
        tx.source = alice.public_key;
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn test_garbage_signature_rejected() {
        init_logger();
        let (alice, bob) = key_pairs();
        let mut tx = Transaction::new(&alice, bob.public_key, 10);
        tx.signature = Signature::from_bytes(&[0u8; 64]).unwrap();
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn test_valid_block() {
        init_logger();
        let (chain, _, _) = two_block_chain();
        assert!(is_valid_block(&chain.blocks[0]));
        assert!(is_valid_block(&chain.blocks[1]));
        assert!(is_valid_block(&Block::genesis(vec![], 0)));
    }

    #[test]
    fn test_block_amount_tamper_detected() {
        init_logger();
        let (mut chain, _, _) = two_block_chain();
        let block = &mut chain.blocks[0];
        block.transactions[0].amount = 576579;
        assert!(!is_valid_block(block));
    }

    #[test]
    fn test_block_hash_tamper_detected() {
        init_logger();
        let (mut chain, _, _) = two_block_chain();
        chain.blocks[1].previous_hash = Some("0".repeat(128));
        assert!(!is_valid_block(&chain.blocks[1]));
    }

    #[test]
    fn test_rehashed_block_with_forged_transaction_rejected() {
        init_logger();
        let (mut chain, _, _) = two_block_chain();
        let block = &mut chain.blocks[0];
        block.transactions[0].amount = 1_000;
        block.hash = block.calculate_hash();
        // Hash is consistent again, the signature is not
        assert!(block.verify_hash());
        assert!(!is_valid_block(block));
    }

    #[test]
    fn test_valid_chain() {
        init_logger();
        let (chain, _, _) = two_block_chain();
        assert!(is_valid_chain(&chain));
    }

    #[test]
    fn test_empty_chain_rejected() {
        init_logger();
        let chain = Chain {
            genesis_block: true,
            blocks: vec![],
        };
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn test_genesis_with_previous_hash_rejected() {
        init_logger();
        let (alice, bob) = key_pairs();
        let block = Block::new(
            Some("ab".repeat(64)),
            vec![Transaction::new(&alice, bob.public_key, 10)],
            0,
        );
        assert!(is_valid_block(&block));
        let chain = Chain {
            genesis_block: true,
            blocks: vec![block],
        };
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn test_broken_link_rejected() {
        init_logger();
        let (alice, bob) = key_pairs();
        let genesis = Block::genesis(vec![Transaction::new(&alice, bob.public_key, 10)], 0);
        let unlinked = Block::new(
            Some("f".repeat(128)),
            vec![Transaction::new(&bob, alice.public_key, 4)],
            1,
        );
        assert!(is_valid_block(&genesis));
        assert!(is_valid_block(&unlinked));

        let chain = Chain {
            genesis_block: true,
            blocks: vec![genesis, unlinked],
        };
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn test_prefix_link_rejected() {
        init_logger();
        let genesis = Block::genesis(vec![], 0);
        let prefix = genesis.hash[..64].to_string();
        let next = Block::new(Some(prefix), vec![], 1);
        let chain = Chain {
            genesis_block: true,
            blocks: vec![genesis, next],
        };
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn test_second_genesis_rejected() {
        init_logger();
        let chain = Chain {
            genesis_block: true,
            blocks: vec![Block::genesis(vec![], 0), Block::genesis(vec![], 1)],
        };
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn test_tampered_genesis_rejected() {
        init_logger();
        let (mut chain, _, _) = two_block_chain();
        chain.blocks[0].nonce = 99;
        assert!(!is_valid_chain(&chain));
    }
}
