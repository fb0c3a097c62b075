//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - SHA-256 and SHA-512 hashing
//! - ECDSA key management and signatures (secp256k1)

pub mod hash;
pub mod keys;

pub use hash::{sha256, sha512, sha512_hex, BLOCK_HASH_HEX_LEN};
pub use keys::{
    derive_public_key, generate_key_pair, sign, verify, verify_hex, KeyError, KeyPair,
    PrivateKey, PublicKey, Signature, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE,
};
