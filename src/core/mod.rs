//! Core ledger components
//!
//! This module contains the data model and its validators:
//! - Transactions (signed value transfers)
//! - Blocks (hash-linked batches of transactions)
//! - Chain (ordered blocks from a genesis block)
//! - Validator (transaction, block and chain integrity checks)

pub mod block;
pub mod chain;
pub mod transaction;
pub mod validator;

pub use block::{Block, NULL_PREVIOUS_HASH};
pub use chain::Chain;
pub use transaction::Transaction;
pub use validator::{is_valid_block, is_valid_chain, is_valid_transaction};
