//! sr25519 signing over canonical sign bytes, and the amino signature envelope.
//!
//! The message is signed as-is. No hashing happens at this layer: the chain's
//! sr25519 verifier checks the signature against the raw sign bytes.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use schnorrkel::{PublicKey, SecretKey, Signature};
use straightedge_types::{PubKey, StdSignature, PUBKEY_SR25519_TYPE};
use tracing::debug;

use crate::error::{MigrateError, MigrateResult};
use crate::keys::sr25519::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use crate::keys::KeyPair;

/// Signing context of Substrate-style sr25519 signatures.
const SIGNING_CONTEXT: &[u8] = b"substrate";

pub const SIGNATURE_LENGTH: usize = 64;

/// Sign `message` with an sr25519 keypair.
pub fn sign(message: &[u8], keypair: &KeyPair) -> MigrateResult<[u8; SIGNATURE_LENGTH]> {
    if keypair.public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(MigrateError::InvalidKeyLength(format!(
            "expected a valid publicKey, {}-bytes, got {}",
            PUBLIC_KEY_LENGTH,
            keypair.public_key.len()
        )));
    }
    if keypair.secret_key.len() != SECRET_KEY_LENGTH {
        return Err(MigrateError::InvalidKeyLength(format!(
            "expected a valid secretKey, {}-bytes, got {}",
            SECRET_KEY_LENGTH,
            keypair.secret_key.len()
        )));
    }

    let secret = SecretKey::from_ed25519_bytes(&keypair.secret_key)
        .map_err(|e| MigrateError::signing(format!("failed to load secret key: {}", e)))?;
    let public = PublicKey::from_bytes(&keypair.public_key)
        .map_err(|e| MigrateError::signing(format!("failed to load public key: {}", e)))?;

    let signature = secret.sign_simple(SIGNING_CONTEXT, message, &public);
    debug!(message_len = message.len(), "Signed sign bytes with sr25519");
    Ok(signature.to_bytes())
}

/// Check an sr25519 signature over `message`.
pub fn verify(message: &[u8], public_key: &[u8], signature: &[u8]) -> MigrateResult<bool> {
    let public = PublicKey::from_bytes(public_key)
        .map_err(|e| MigrateError::signing(format!("invalid public key: {}", e)))?;
    let signature = match Signature::from_bytes(signature) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };
    Ok(public
        .verify_simple(SIGNING_CONTEXT, message, &signature)
        .is_ok())
}

/// Wrap a public key and raw signature in the chain's signature envelope.
pub fn encode_signature(public_key: &[u8], raw_signature: &[u8]) -> StdSignature {
    StdSignature {
        pub_key: PubKey {
            kind: PUBKEY_SR25519_TYPE.to_string(),
            value: BASE64.encode(public_key),
        },
        signature: BASE64.encode(raw_signature),
    }
}

/// Reverse of [`encode_signature`]: returns `(public_key, raw_signature)`.
pub fn decode_signature(envelope: &StdSignature) -> MigrateResult<(Vec<u8>, Vec<u8>)> {
    if envelope.pub_key.kind != PUBKEY_SR25519_TYPE {
        return Err(MigrateError::signing(format!(
            "unsupported public key type {}",
            envelope.pub_key.kind
        )));
    }

    let public_key = BASE64
        .decode(&envelope.pub_key.value)
        .map_err(|e| MigrateError::signing(format!("invalid public key encoding: {}", e)))?;
    let signature = BASE64
        .decode(&envelope.signature)
        .map_err(|e| MigrateError::signing(format!("invalid signature encoding: {}", e)))?;

    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(MigrateError::InvalidPublicKeyLength {
            scheme: "sr25519",
            expected: PUBLIC_KEY_LENGTH,
            actual: public_key.len(),
        });
    }
    if signature.len() != SIGNATURE_LENGTH {
        return Err(MigrateError::signing(format!(
            "expected a {}-byte signature, got {}",
            SIGNATURE_LENGTH,
            signature.len()
        )));
    }

    Ok((public_key, signature))
}
