//! Deterministic key derivation from a BIP-39 mnemonic.
//!
//! One phrase yields two unrelated keys: the legacy sr25519 account key and
//! the secp256k1 key at the Cosmos Hub HD path.

pub mod secp256k1;
pub mod sr25519;

pub use secp256k1::derive_secp256k1;
pub use sr25519::derive_sr25519;

use bip39::{Language, Mnemonic};
use std::fmt;
use zeroize::Zeroize;

use crate::error::{MigrateError, MigrateResult};

/// Signature scheme a keypair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme {
    Sr25519,
    Secp256k1,
}

impl KeyScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sr25519 => "sr25519",
            Self::Secp256k1 => "secp256k1",
        }
    }

    /// Expected public key length in bytes (secp256k1 keys are compressed).
    pub fn public_key_len(&self) -> usize {
        match self {
            Self::Sr25519 => sr25519::PUBLIC_KEY_LENGTH,
            Self::Secp256k1 => secp256k1::PUBLIC_KEY_LENGTH,
        }
    }

    pub fn secret_key_len(&self) -> usize {
        match self {
            Self::Sr25519 => sr25519::SECRET_KEY_LENGTH,
            Self::Secp256k1 => secp256k1::SECRET_KEY_LENGTH,
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// KeyPair holds raw key bytes tagged with their scheme.
///
/// sr25519: 32-byte public key, 64-byte secret (scalar || nonce).
/// secp256k1: 33-byte compressed public key, 32-byte secret scalar.
pub struct KeyPair {
    pub scheme: KeyScheme,
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
}

impl KeyPair {
    pub fn new(scheme: KeyScheme, public_key: Vec<u8>, secret_key: Vec<u8>) -> Self {
        Self {
            scheme,
            public_key,
            secret_key,
        }
    }

    /// Check both key lengths against the scheme.
    pub fn ensure_lengths(&self) -> MigrateResult<()> {
        let public_len = self.scheme.public_key_len();
        let secret_len = self.scheme.secret_key_len();
        if self.public_key.len() != public_len || self.secret_key.len() != secret_len {
            return Err(MigrateError::InvalidKeyLength(format!(
                "{} expects a {}-byte public key and {}-byte secret key, got {} and {}",
                self.scheme,
                public_len,
                secret_len,
                self.public_key.len(),
                self.secret_key.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("scheme", &self.scheme)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

/// Parse and checksum-validate an English BIP-39 phrase.
///
/// Runs of whitespace between words are collapsed first, so a phrase pasted
/// with line breaks is accepted.
pub fn parse_mnemonic(phrase: &str) -> MigrateResult<Mnemonic> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| MigrateError::InvalidMnemonic(e.to_string()))
}

/// Validate that a string is a valid BIP-39 mnemonic.
pub fn validate_mnemonic(phrase: &str) -> MigrateResult<()> {
    parse_mnemonic(phrase).map(|_| ())
}
