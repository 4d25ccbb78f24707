use cosmrs::bip32::{DerivationPath, XPrv};
use cosmrs::crypto::secp256k1::SigningKey;
use zeroize::Zeroizing;

use super::{parse_mnemonic, KeyPair, KeyScheme};
use crate::error::{MigrateError, MigrateResult};

/// Cosmos Hub HD derivation path (coin type 118).
pub const COSMOS_HD_PATH: &str = "m/44'/118'/0'/0/0";

pub const PUBLIC_KEY_LENGTH: usize = 33;
pub const SECRET_KEY_LENGTH: usize = 32;

/// Derive the secp256k1 keypair at the Cosmos Hub path from a BIP-39 mnemonic.
/// Returns raw key bytes: private key (32 bytes), public key (33 bytes compressed).
pub fn derive_secp256k1(phrase: &str) -> MigrateResult<KeyPair> {
    let mnemonic = parse_mnemonic(phrase)?;
    let seed = Zeroizing::new(mnemonic.to_seed(""));

    let path: DerivationPath = COSMOS_HD_PATH
        .parse()
        .map_err(|e| MigrateError::derivation(format!("invalid HD path: {}", e)))?;

    let child_xprv = XPrv::derive_from_path(&seed[..], &path)
        .map_err(|e| MigrateError::derivation(format!("key derivation failed: {}", e)))?;

    let private_key_bytes: Vec<u8> = child_xprv.private_key().to_bytes().to_vec();

    // Construct cosmrs SigningKey to derive the compressed public key
    let signing_key = SigningKey::from_slice(&private_key_bytes)
        .map_err(|e| MigrateError::derivation(format!("failed to create signing key: {}", e)))?;
    let public_key = signing_key.public_key().to_bytes();

    Ok(KeyPair::new(
        KeyScheme::Secp256k1,
        public_key,
        private_key_bytes,
    ))
}
