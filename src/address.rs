//! Public key to bech32 account address.
//!
//! The two account types hash differently: sr25519 accounts take the first
//! 20 bytes of a single SHA-256, secp256k1 accounts use the standard Cosmos
//! RIPEMD160(SHA256(pubkey)). Mixing them up yields a valid-looking address
//! nobody controls.

use cosmrs::crypto::secp256k1::VerifyingKey;
use cosmrs::crypto::PublicKey;
use cosmrs::AccountId;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{MigrateError, MigrateResult};
use crate::keys::KeyScheme;

/// Length of the hash an address encodes.
pub const ADDRESS_LENGTH: usize = 20;

/// Address of an sr25519 account: bech32(prefix, sha256(pubkey)[..20]).
pub fn sr25519_address(public_key: &[u8], prefix: &str) -> MigrateResult<String> {
    ensure_public_key_len(KeyScheme::Sr25519, public_key)?;
    let digest = Sha256::digest(public_key);
    let address = encode_address(&digest[..ADDRESS_LENGTH], prefix)?;
    debug!(address = %address, "Derived sr25519 address");
    Ok(address)
}

/// Address of a secp256k1 account from its 33-byte compressed public key.
pub fn secp256k1_address(compressed_public_key: &[u8], prefix: &str) -> MigrateResult<String> {
    ensure_public_key_len(KeyScheme::Secp256k1, compressed_public_key)?;
    let verifying_key = VerifyingKey::from_sec1_bytes(compressed_public_key)
        .map_err(|e| MigrateError::InvalidAddress(format!("not a secp256k1 point: {}", e)))?;
    let account_id = PublicKey::from(verifying_key)
        .account_id(prefix)
        .map_err(|e| MigrateError::InvalidAddress(format!("failed to derive address: {}", e)))?;
    let address = account_id.to_string();
    debug!(address = %address, "Derived secp256k1 address");
    Ok(address)
}

/// Bech32-encode a 20-byte account hash.
pub fn encode_address(hash: &[u8], prefix: &str) -> MigrateResult<String> {
    if hash.len() != ADDRESS_LENGTH {
        return Err(MigrateError::InvalidAddress(format!(
            "expected a {}-byte hash, got {}",
            ADDRESS_LENGTH,
            hash.len()
        )));
    }
    AccountId::new(prefix, hash)
        .map(|id| id.to_string())
        .map_err(|e| MigrateError::InvalidAddress(e.to_string()))
}

/// Decode a bech32 address, checking its checksum and prefix, and return
/// the 20-byte hash it carries.
pub fn decode_address(address: &str, prefix: &str) -> MigrateResult<[u8; ADDRESS_LENGTH]> {
    let account_id: AccountId = address
        .parse()
        .map_err(|e| MigrateError::InvalidAddress(format!("{}: {}", address, e)))?;

    if account_id.prefix() != prefix {
        return Err(MigrateError::InvalidAddress(format!(
            "{} has prefix {}, expected {}",
            address,
            account_id.prefix(),
            prefix
        )));
    }

    let bytes = account_id.to_bytes();
    <[u8; ADDRESS_LENGTH]>::try_from(bytes.as_slice()).map_err(|_| {
        MigrateError::InvalidAddress(format!(
            "{} encodes {} bytes, expected {}",
            address,
            bytes.len(),
            ADDRESS_LENGTH
        ))
    })
}

fn ensure_public_key_len(scheme: KeyScheme, key: &[u8]) -> MigrateResult<()> {
    let expected = scheme.public_key_len();
    if key.len() != expected {
        return Err(MigrateError::InvalidPublicKeyLength {
            scheme: scheme.as_str(),
            expected,
            actual: key.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::tests::TEST_MNEMONIC;
    use crate::keys::{derive_secp256k1, derive_sr25519};

    const SR25519_GOLDEN: &str = "str1q7rkep9lgv75duhvl8wc6v8f0rwtwtyas9g40t";
    const SECP256K1_GOLDEN: &str = "str19rl4cm2hmr8afy4kldpxz3fka4jguq0a289w8u";

    #[test]
    fn sr25519_reference_address() {
        let pair = derive_sr25519(TEST_MNEMONIC, "").unwrap();
        assert_eq!(sr25519_address(&pair.public_key, "str").unwrap(), SR25519_GOLDEN);
    }

    #[test]
    fn secp256k1_reference_address() {
        let pair = derive_secp256k1(TEST_MNEMONIC).unwrap();
        assert_eq!(
            secp256k1_address(&pair.public_key, "str").unwrap(),
            SECP256K1_GOLDEN
        );
        // Same key under the Cosmos Hub prefix is the well-known test account.
        assert_eq!(
            secp256k1_address(&pair.public_key, "cosmos").unwrap(),
            "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4"
        );
    }

    #[test]
    fn decode_recovers_hash() {
        let pair = derive_sr25519(TEST_MNEMONIC, "").unwrap();
        let digest = Sha256::digest(&pair.public_key);
        let hash = decode_address(SR25519_GOLDEN, "str").unwrap();
        assert_eq!(&hash[..], &digest[..ADDRESS_LENGTH]);
    }

    #[test]
    fn encode_then_decode_is_identity() {
        let hash = [7u8; ADDRESS_LENGTH];
        let address = encode_address(&hash, "str").unwrap();
        assert!(address.starts_with("str1"));
        assert_eq!(decode_address(&address, "str").unwrap(), hash);
    }

    #[test]
    fn decode_rejects_wrong_prefix() {
        assert!(matches!(
            decode_address("cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4", "str"),
            Err(MigrateError::InvalidAddress(_))
        ));
    }

    #[test]
    fn decode_rejects_bad_checksum() {
        let mut tampered = SR25519_GOLDEN.to_string();
        tampered.pop();
        tampered.push('q');
        assert!(decode_address(&tampered, "str").is_err());
    }

    #[test]
    fn wrong_key_lengths_are_rejected() {
        assert!(matches!(
            sr25519_address(&[0u8; 33], "str"),
            Err(MigrateError::InvalidPublicKeyLength {
                scheme: "sr25519",
                expected: 32,
                actual: 33
            })
        ));
        assert!(matches!(
            secp256k1_address(&[2u8; 32], "str"),
            Err(MigrateError::InvalidPublicKeyLength {
                scheme: "secp256k1",
                expected: 33,
                actual: 32
            })
        ));
    }

    #[test]
    fn schemes_never_collide() {
        let sr = derive_sr25519(TEST_MNEMONIC, "").unwrap();
        let secp = derive_secp256k1(TEST_MNEMONIC).unwrap();
        assert_ne!(
            sr25519_address(&sr.public_key, "str").unwrap(),
            secp256k1_address(&secp.public_key, "str").unwrap()
        );
    }
}
