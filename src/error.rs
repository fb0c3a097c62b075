//! Error types for the ledger data model

use crate::crypto::KeyError;
use thiserror::Error;

/// Ledger-level errors.
///
/// Only structural and operational failures live here. A record or block
/// that is well-formed but forged is never an error; the validators
/// answer `false` for it.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Key error: {0}")]
    Key(#[from] KeyError),
    #[error("Block rejected: {0}")]
    RejectedBlock(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::MalformedInput(err.to_string())
    }
}
