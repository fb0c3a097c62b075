//! ECDSA key management for the ledger
//!
//! Provides key pair generation, public key derivation, signing and
//! verification using the secp256k1 elliptic curve. Messages are always
//! hashed with SHA-256 before they reach the signature primitive.

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{ecdsa, Message, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::hash::sha256;

/// Size of a raw private key scalar in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of a compressed public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 33;

/// Size of a compact (`r || s`) signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Decode hex in the canonical lowercase form only
fn decode_lower_hex(text: &str) -> Option<Vec<u8>> {
    if !text.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')) {
        return None;
    }
    hex::decode(text).ok()
}

/// Errors that can occur during key operations
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Secure random source unavailable: {0}")]
    Entropy(String),
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid signature encoding")]
    InvalidSignature,
}

/// A secp256k1 secret scalar.
///
/// Always a valid scalar (non-zero, below the curve order). Never
/// serialized and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Parse a private key from its 32 raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(KeyError::InvalidPrivateKey);
        }
        SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| KeyError::InvalidPrivateKey)
    }

    /// Parse a private key from a 64 character lowercase hex string
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = decode_lower_hex(hex_key).ok_or(KeyError::InvalidPrivateKey)?;
        Self::from_bytes(&bytes)
    }

    /// Raw scalar bytes
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0.secret_bytes()
    }

    /// Lowercase hex encoding of the scalar
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The public key paired with this scalar
    pub fn public_key(&self) -> PublicKey {
        derive_public_key(self)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A compressed secp256k1 public key (33 bytes).
///
/// Parsing checks that the bytes encode a point on the curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    /// Parse a public key from its 33 compressed bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(KeyError::InvalidPublicKey);
        }
        secp256k1::PublicKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| KeyError::InvalidPublicKey)
    }

    /// Parse a public key from a 66 character lowercase hex string
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = decode_lower_hex(hex_key).ok_or(KeyError::InvalidPublicKey)?;
        Self::from_bytes(&bytes)
    }

    /// Compressed point encoding
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0.serialize()
    }

    /// Lowercase hex encoding of the compressed point
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl TryFrom<String> for PublicKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.to_hex()
    }
}

/// A detached compact ECDSA signature (`r || s`, 64 bytes).
///
/// Holds the raw bytes as received; whether they form a valid signature
/// is only decided by [`verify`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    /// Wrap 64 raw signature bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let raw: [u8; SIGNATURE_SIZE] =
            bytes.try_into().map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self(raw))
    }

    /// Parse a signature from a 128 character lowercase hex string
    pub fn from_hex(hex_sig: &str) -> Result<Self, KeyError> {
        let bytes = decode_lower_hex(hex_sig).ok_or(KeyError::InvalidSignature)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl TryFrom<String> for Signature {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Signature> for String {
    fn from(sig: Signature) -> Self {
        sig.to_hex()
    }
}

/// A key pair consisting of a private key and its corresponding public key
#[derive(Clone)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Result<Self, KeyError> {
        generate_key_pair()
    }

    /// Create a key pair from an existing private key
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = derive_public_key(&private_key);
        Self {
            private_key,
            public_key,
        }
    }

    /// Create a key pair from a hex-encoded private key
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, KeyError> {
        Ok(Self::from_private_key(PrivateKey::from_hex(hex_key)?))
    }

    /// Sign a message with the private key
    pub fn sign(&self, message: &[u8]) -> Signature {
        sign(&self.private_key, message)
    }

    /// Verify a signature against this key pair's public key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        verify(&self.public_key, message, signature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Generate a new key pair from the operating system's secure random source.
///
/// Draws 32 bytes per attempt; a draw that is not a valid scalar is
/// discarded and redrawn.
pub fn generate_key_pair() -> Result<KeyPair, KeyError> {
    let mut bytes = [0u8; PRIVATE_KEY_SIZE];
    loop {
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| KeyError::Entropy(e.to_string()))?;
        if let Ok(private_key) = PrivateKey::from_bytes(&bytes) {
            return Ok(KeyPair::from_private_key(private_key));
        }
        log::debug!("Discarding out-of-range private key draw");
    }
}

/// Derive the compressed public key for a private key
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    let secp = Secp256k1::signing_only();
    PublicKey(secp256k1::PublicKey::from_secret_key(&secp, &private_key.0))
}

/// Sign `SHA256(message)` with a private key.
///
/// Nonces are derived per RFC 6979, so the same key and message always
/// produce the same signature.
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    let secp = Secp256k1::signing_only();
    let digest = Message::from_digest(sha256(message));
    Signature(secp.sign_ecdsa(&digest, &private_key.0).serialize_compact())
}

/// Verify a signature over `SHA256(message)`.
///
/// Returns `false` both for a well-formed signature that does not match
/// and for bytes that are not a valid signature encoding.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let secp = Secp256k1::verification_only();
    let digest = Message::from_digest(sha256(message));
    match ecdsa::Signature::from_compact(&signature.0) {
        Ok(sig) => secp.verify_ecdsa(&digest, &sig, &public_key.0).is_ok(),
        Err(_) => false,
    }
}

/// Verify using hex encoded key and signature. Any decoding failure is
/// reported as `false`.
pub fn verify_hex(public_key_hex: &str, message: &[u8], signature_hex: &str) -> bool {
    match (
        PublicKey::from_hex(public_key_hex),
        Signature::from_hex(signature_hex),
    ) {
        (Ok(public_key), Ok(signature)) => verify(&public_key, message, &signature),
        _ => false,
    }
}
