//! Cryptographic hashing utilities for the ledger
//!
//! SHA-256 digests feed the signature primitive, SHA-512 digests
//! identify blocks.

use sha2::{Digest, Sha256, Sha512};

/// Length of a hex-encoded SHA-512 digest
pub const BLOCK_HASH_HEX_LEN: usize = 128;

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes SHA-512 hash of the input data
pub fn sha512(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Computes SHA-512 hash and returns it as a lowercase hex string
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512(data))
}
