//! Chain of blocks
//!
//! A chain is an ordered sequence of blocks starting at a genesis block,
//! each later block naming its predecessor's hash.

use crate::core::block::Block;
use crate::core::transaction::Transaction;
use crate::core::validator::{is_valid_block, is_valid_chain};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

/// An ordered, hash-linked sequence of blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    /// Marker carried with the chain; validity is decided by `blocks[0]`
    pub genesis_block: bool,
    /// Blocks in order, index 0 is genesis
    pub blocks: Vec<Block>,
}

impl Chain {
    /// Start a chain from a genesis block
    pub fn new(genesis: Block) -> Result<Self, LedgerError> {
        if !genesis.is_genesis() {
            return Err(LedgerError::RejectedBlock(
                "genesis block must not have a previous hash".to_string(),
            ));
        }
        if !is_valid_block(&genesis) {
            return Err(LedgerError::RejectedBlock(
                "genesis block failed validation".to_string(),
            ));
        }
        Ok(Self {
            genesis_block: true,
            blocks: vec![genesis],
        })
    }

    /// Decode a chain from JSON, rejecting any missing or malformed field
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode and validate a chain.
    ///
    /// Structural defects are errors; a well-formed but forged chain is
    /// `Ok(false)`.
    pub fn validate_json(json: &str) -> Result<bool, LedgerError> {
        let chain = Self::from_json(json)?;
        Ok(is_valid_chain(&chain))
    }

    /// Get the latest block
    pub fn latest_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Number of blocks after genesis
    pub fn height(&self) -> usize {
        self.blocks.len().saturating_sub(1)
    }

    /// All transactions, in block order then in-block order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.blocks.iter().flat_map(|b| b.transactions.iter())
    }

    /// Append a block that links to the current tip and validates
    pub fn append(&mut self, block: Block) -> Result<(), LedgerError> {
        let tip = self
            .latest_block()
            .ok_or_else(|| LedgerError::RejectedBlock("chain has no genesis block".to_string()))?;

        if block.previous_hash.as_deref() != Some(tip.hash.as_str()) {
            log::warn!("Refusing block {}: does not link to tip", block.hash);
            return Err(LedgerError::RejectedBlock(
                "previous hash does not match the chain tip".to_string(),
            ));
        }

        if !is_valid_block(&block) {
            log::warn!("Refusing block {}: failed validation", block.hash);
            return Err(LedgerError::RejectedBlock(
                "block failed validation".to_string(),
            ));
        }

        log::info!(
            "Appended block {} at height {}",
            block.hash,
            self.blocks.len()
        );
        self.blocks.push(block);
        Ok(())
    }

    /// Validate the entire chain
    pub fn is_valid(&self) -> bool {
        is_valid_chain(self)
    }
}
