//! Block implementation for the ledger
//!
//! A block is an ordered batch of transactions linked to its predecessor
//! through `previous_hash`. Its `hash` is the hex SHA-512 digest of
//! `previous_hash ++ signatures ++ nonce`.

use crate::core::transaction::Transaction;
use crate::crypto::sha512_hex;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

/// Text that stands in for an absent previous hash in the hash input
pub const NULL_PREVIOUS_HASH: &str = "null";

/// A block in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Hash of the previous block, `None` for a genesis block
    #[serde(deserialize_with = "Option::deserialize")]
    pub previous_hash: Option<String>,
    /// Transactions in hash order
    pub transactions: Vec<Transaction>,
    /// Free value mixed into the hash
    pub nonce: u64,
    /// Hash computed when the block was assembled
    pub hash: String,
}

impl Block {
    /// Assemble a block and compute its hash
    pub fn new(previous_hash: Option<String>, transactions: Vec<Transaction>, nonce: u64) -> Self {
        let mut block = Self {
            previous_hash,
            transactions,
            nonce,
            hash: String::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    /// Assemble a genesis block (no previous hash)
    pub fn genesis(transactions: Vec<Transaction>, nonce: u64) -> Self {
        Self::new(None, transactions, nonce)
    }

    /// Decode a block from JSON, rejecting any missing or malformed field
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_none()
    }

    /// The canonical string hashed into `hash`, built from current field values
    pub fn hash_input(&self) -> String {
        let previous = self.previous_hash.as_deref().unwrap_or(NULL_PREVIOUS_HASH);
        let signatures: String = self
            .transactions
            .iter()
            .map(|tx| tx.signature.to_hex())
            .collect();
        format!("{}{}{}", previous, signatures, self.nonce)
    }

    /// Recompute the block hash
    pub fn calculate_hash(&self) -> String {
        sha512_hex(self.hash_input().as_bytes())
    }

    /// Verify the stored hash against a fresh recomputation
    pub fn verify_hash(&self) -> bool {
        self.hash == self.calculate_hash()
    }
}
