//! Ledger integrity: signing and validation for a hash-chained ledger
//!
//! This crate provides:
//! - secp256k1 key generation, signing and verification over SHA-256 digests
//! - Signed transaction records
//! - Blocks identified by a SHA-512 hash over their linkage and signatures
//! - Validation of single transactions, single blocks and whole chains
//!
//! It does not produce consensus, store blocks or talk to peers; it only
//! judges data structures already assembled in memory.
//!
//! # Example
//!
//! ```rust
//! use ledger_integrity::core::{is_valid_chain, Block, Chain, Transaction};
//! use ledger_integrity::crypto::generate_key_pair;
//!
//! let alice = generate_key_pair().unwrap();
//! let bob = generate_key_pair().unwrap();
//!
//! let tx = Transaction::new(&alice, bob.public_key, 10);
//! let chain = Chain::new(Block::genesis(vec![tx], 0)).unwrap();
//! assert!(is_valid_chain(&chain));
//! ```

pub mod core;
pub mod crypto;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    is_valid_block, is_valid_chain, is_valid_transaction, Block, Chain, Transaction,
};
pub use crate::crypto::{
    derive_public_key, generate_key_pair, sign, verify, KeyError, KeyPair, PrivateKey, PublicKey,
    Signature,
};
pub use crate::error::LedgerError;
