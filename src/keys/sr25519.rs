//! sr25519 (Schnorrkel) key derivation, Substrate style.
//!
//! The mini-secret is PBKDF2-HMAC-SHA512 over the mnemonic's entropy rather
//! than over its words, which is what distinguishes it from a BIP-39 seed.

use pbkdf2::pbkdf2_hmac;
use schnorrkel::{ExpansionMode, MiniSecretKey};
use sha2::Sha512;
use zeroize::Zeroizing;

use super::{parse_mnemonic, KeyPair, KeyScheme};
use crate::error::{MigrateError, MigrateResult};

pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const SECRET_KEY_LENGTH: usize = 64;
pub const MINI_SECRET_LENGTH: usize = 32;

const PBKDF2_ROUNDS: u32 = 2048;

/// Derive the sr25519 keypair for a mnemonic and passphrase (may be empty).
pub fn derive_sr25519(phrase: &str, passphrase: &str) -> MigrateResult<KeyPair> {
    let mnemonic = parse_mnemonic(phrase)?;
    let entropy = Zeroizing::new(mnemonic.to_entropy());
    let mini_secret = mini_secret_from_entropy(&entropy, passphrase)?;
    keypair_from_seed(&mini_secret[..])
}

/// Compute the 32-byte mini-secret from BIP-39 entropy.
pub fn mini_secret_from_entropy(
    entropy: &[u8],
    passphrase: &str,
) -> MigrateResult<Zeroizing<[u8; MINI_SECRET_LENGTH]>> {
    if !(16..=32).contains(&entropy.len()) || entropy.len() % 4 != 0 {
        return Err(MigrateError::InvalidMnemonic(format!(
            "unsupported entropy length {}",
            entropy.len()
        )));
    }

    let salt = Zeroizing::new(format!("mnemonic{}", passphrase).into_bytes());
    let mut seed = Zeroizing::new([0u8; 64]);
    pbkdf2_hmac::<Sha512>(entropy, &salt, PBKDF2_ROUNDS, &mut seed[..]);

    let mut mini_secret = Zeroizing::new([0u8; MINI_SECRET_LENGTH]);
    mini_secret.copy_from_slice(&seed[..MINI_SECRET_LENGTH]);
    Ok(mini_secret)
}

/// Expand a mini-secret into a keypair (Ed25519 expansion mode).
///
/// The secret key is returned in its Ed25519-compatible byte form.
pub fn keypair_from_seed(seed: &[u8]) -> MigrateResult<KeyPair> {
    let mini = MiniSecretKey::from_bytes(seed)
        .map_err(|e| MigrateError::derivation(format!("invalid sr25519 mini-secret: {}", e)))?;
    let keypair = mini.expand_to_keypair(ExpansionMode::Ed25519);

    Ok(KeyPair::new(
        KeyScheme::Sr25519,
        keypair.public.to_bytes().to_vec(),
        keypair.secret.to_ed25519_bytes().to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::tests::TEST_MNEMONIC;

    #[test]
    fn mini_secret_matches_reference_vector() {
        let mini = mini_secret_from_entropy(&[0u8; 16], "").unwrap();
        assert_eq!(
            hex(&mini[..]),
            "4ed8d4b17698ddeaa1f1559f152f87b5d472f725ca86d341bd0276f1b61197e2"
        );
    }

    #[test]
    fn derives_reference_public_key() {
        let pair = derive_sr25519(TEST_MNEMONIC, "").unwrap();
        assert_eq!(pair.scheme, KeyScheme::Sr25519);
        assert_eq!(
            hex(&pair.public_key),
            "66933bd1f37070ef87bd1198af3dacceb095237f803f3d32b173e6b425ed7972"
        );
        assert_eq!(pair.secret_key.len(), SECRET_KEY_LENGTH);
        assert!(pair.ensure_lengths().is_ok());
    }

    #[test]
    fn deterministic_derivation() {
        let first = derive_sr25519(TEST_MNEMONIC, "").unwrap();
        let second = derive_sr25519(TEST_MNEMONIC, "").unwrap();
        assert_eq!(first.public_key, second.public_key);
        assert_eq!(first.secret_key, second.secret_key);
    }

    #[test]
    fn passphrase_changes_key() {
        let plain = derive_sr25519(TEST_MNEMONIC, "").unwrap();
        let salted = derive_sr25519(TEST_MNEMONIC, "Substrate").unwrap();
        assert_ne!(plain.public_key, salted.public_key);
    }

    #[test]
    fn rejects_invalid_mnemonic() {
        assert!(matches!(
            derive_sr25519("abandon abandon abandon", ""),
            Err(MigrateError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn rejects_odd_entropy() {
        assert!(mini_secret_from_entropy(&[0u8; 15], "").is_err());
        assert!(mini_secret_from_entropy(&[0u8; 18], "").is_err());
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
