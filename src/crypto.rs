//! Signing primitives for the ledger (secp256k1 ECDSA over SHA-256 digests)

use crate::error::{ChainError, Result};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{
    constants::{COMPACT_SIGNATURE_SIZE, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE},
    ecdsa, All, Message, Secp256k1, SecretKey,
};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::trace;

/// A thread-safe, lazily initialized Secp256k1 context.
/// This prevents repeated, unnecessary context creation.
static SECP256K1_CONTEXT: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Upper bound on random draws while looking for an in-range scalar.
/// A single draw is out of range with probability below 2^-127.
const MAX_KEYGEN_ATTEMPTS: usize = 128;

/// SHA-256 of `data` as a 64 character lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn message_digest(message: &[u8]) -> Message {
    Message::from_digest(Sha256::digest(message).into())
}

fn decode_hex(kind: &str, hex_str: &str, expected: usize) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| ChainError::InvalidKeyMaterial(format!("Invalid hex {}: {}", kind, e)))?;
    if bytes.len() != expected {
        return Err(ChainError::InvalidKeyMaterial(format!(
            "{} must be {} bytes, got {}",
            kind,
            expected,
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// A secp256k1 secret scalar, guaranteed non-zero and below the curve order.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Draws a fresh key from the OS random number generator.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SECRET_KEY_SIZE];
        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            OsRng
                .try_fill_bytes(&mut bytes)
                .map_err(|e| ChainError::EntropyExhausted(e.to_string()))?;
            if let Ok(secret_key) = SecretKey::from_slice(&bytes) {
                trace!(attempt, "generated private key");
                return Ok(PrivateKey(secret_key));
            }
        }
        Err(ChainError::EntropyExhausted(format!(
            "No valid scalar after {} draws",
            MAX_KEYGEN_ATTEMPTS
        )))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let secret_key = SecretKey::from_slice(bytes).map_err(|e| {
            if bytes.len() != SECRET_KEY_SIZE {
                ChainError::InvalidKeyMaterial(format!(
                    "Private key must be {} bytes, got {}",
                    SECRET_KEY_SIZE,
                    bytes.len()
                ))
            } else {
                ChainError::InvalidKeyMaterial(format!("Private key out of range: {}", e))
            }
        })?;
        Ok(PrivateKey(secret_key))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex("Private key", hex_str, SECRET_KEY_SIZE)?)
    }

    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.0.secret_bytes()
    }

    /// 64 character lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        derive_public_key(self)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A compressed secp256k1 point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(ChainError::InvalidKeyMaterial(format!(
                "Public key must be exactly {} bytes (compressed), got {}",
                PUBLIC_KEY_SIZE,
                bytes.len()
            )));
        }
        secp256k1::PublicKey::from_slice(bytes)
            .map(PublicKey)
            .map_err(|e| ChainError::InvalidKeyMaterial(format!("Invalid public key: {}", e)))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex("Public key", hex_str, PUBLIC_KEY_SIZE)?)
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0.serialize()
    }

    /// 66 character lowercase hex encoding of the compressed point.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// A compact `r || s` ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(ecdsa::Signature);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPACT_SIGNATURE_SIZE {
            return Err(ChainError::InvalidKeyMaterial(format!(
                "Signature must be exactly {} bytes (compact), got {}",
                COMPACT_SIGNATURE_SIZE,
                bytes.len()
            )));
        }
        ecdsa::Signature::from_compact(bytes)
            .map(Signature)
            .map_err(|e| ChainError::InvalidKeyMaterial(format!("Invalid signature: {}", e)))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex("Signature", hex_str, COMPACT_SIGNATURE_SIZE)?)
    }

    pub fn to_bytes(&self) -> [u8; COMPACT_SIGNATURE_SIZE] {
        self.0.serialize_compact()
    }

    /// 128 character lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    pub fn generate() -> Result<Self> {
        Ok(Self::from_private_key(PrivateKey::generate()?))
    }

    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = derive_public_key(&private_key);
        KeyPair {
            private_key,
            public_key,
        }
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        sign(&self.private_key, message)
    }
}

pub fn generate_private_key() -> Result<PrivateKey> {
    PrivateKey::generate()
}

pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    PublicKey(secp256k1::PublicKey::from_secret_key(
        &SECP256K1_CONTEXT,
        &private_key.0,
    ))
}

/// Signs the SHA-256 digest of `message` (RFC 6979 nonce, low-S).
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    Signature(SECP256K1_CONTEXT.sign_ecdsa(&message_digest(message), &private_key.0))
}

pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    SECP256K1_CONTEXT
        .verify_ecdsa(&message_digest(message), &signature.0, &public_key.0)
        .is_ok()
}

/// Hex boundary variant of [`sign`]. Fails only on a malformed private key.
pub fn sign_hex(private_key_hex: &str, message: &[u8]) -> Result<String> {
    let private_key = PrivateKey::from_hex(private_key_hex)?;
    Ok(sign(&private_key, message).to_hex())
}

/// Hex boundary variant of [`verify`]. Malformed keys or signatures are `false`.
pub fn verify_hex(public_key_hex: &str, message: &[u8], signature_hex: &str) -> bool {
    let (public_key, signature) = match (
        PublicKey::from_hex(public_key_hex),
        Signature::from_hex(signature_hex),
    ) {
        (Ok(pk), Ok(sig)) => (pk, sig),
        _ => return false,
    };
    verify(&public_key, message, &signature)
}
