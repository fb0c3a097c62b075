//! Transaction records
//!
//! A transaction is a signed assertion that `source` transfers `amount`
//! to `recipient`. The signature covers the canonical message
//! `source_hex ++ recipient_hex ++ amount` and is computed once, when the
//! record is created.

use crate::crypto::{KeyPair, PublicKey, Signature};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

/// A signed value transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Sender's public key
    pub source: PublicKey,
    /// Receiver's public key
    pub recipient: PublicKey,
    /// Amount transferred, in integer units
    pub amount: i64,
    /// Sender's signature over [`Transaction::canonical_message`]
    pub signature: Signature,
}

impl Transaction {
    /// Create a transaction and sign it with the sender's key pair
    pub fn new(sender: &KeyPair, recipient: PublicKey, amount: i64) -> Self {
        let message = signing_message(&sender.public_key, &recipient, amount);
        let signature = sender.sign(message.as_bytes());
        Self {
            source: sender.public_key,
            recipient,
            amount,
            signature,
        }
    }

    /// Build a transaction from its hex-encoded wire fields.
    ///
    /// Key and signature decoding failures are returned as
    /// [`LedgerError::Key`]; the signature is not checked here.
    pub fn from_hex_parts(
        source: &str,
        recipient: &str,
        amount: i64,
        signature: &str,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            source: PublicKey::from_hex(source)?,
            recipient: PublicKey::from_hex(recipient)?,
            amount,
            signature: Signature::from_hex(signature)?,
        })
    }

    /// Decode a transaction from JSON, rejecting any missing or malformed field
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The exact string the sender signed, rebuilt from the current fields
    pub fn canonical_message(&self) -> String {
        signing_message(&self.source, &self.recipient, self.amount)
    }
}

/// Hex source, hex recipient and decimal amount, with no separators
fn signing_message(source: &PublicKey, recipient: &PublicKey, amount: i64) -> String {
    format!("{}{}{}", source.to_hex(), recipient.to_hex(), amount)
}
