//! Session payload cipher.
//!
//! AES-256-GCM with a key derived as SHA-256 of the configured secret. Each
//! ciphertext is `base64(nonce || sealed)` with a fresh random 96-bit nonce.
//!
//! The secret ships with the client, so this only obfuscates the stored
//! session; it is not a security boundary.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 12;

/// Errors raised while sealing or opening a payload.
#[derive(Debug)]
pub enum CipherError {
    /// Payload is not valid base64.
    Encoding(base64::DecodeError),
    /// Payload is shorter than a nonce.
    Truncated,
    /// Authentication failed: wrong key or tampered payload.
    Aead,
}

impl std::fmt::Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::Encoding(e) => write!(f, "Invalid encoding: {}", e),
            CipherError::Truncated => write!(f, "Payload too short"),
            CipherError::Aead => write!(f, "Authentication failed"),
        }
    }
}

impl std::error::Error for CipherError {}

impl From<base64::DecodeError> for CipherError {
    fn from(e: base64::DecodeError) -> Self {
        CipherError::Encoding(e)
    }
}

impl From<aes_gcm::Error> for CipherError {
    fn from(_: aes_gcm::Error) -> Self {
        CipherError::Aead
    }
}

pub struct SessionCipher {
    cipher: Aes256Gcm,
}

impl SessionCipher {
    pub fn new(secret: &SecretString) -> Self {
        let key = Sha256::digest(secret.expose_secret().as_bytes());
        Self {
            cipher: Aes256Gcm::new(&key),
        }
    }

    /// Seals `plaintext` under a fresh nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)?;

        let mut payload = Vec::with_capacity(NONCE_LEN + sealed.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&sealed);
        Ok(STANDARD.encode(payload))
    }

    /// Opens a payload produced by [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, encoded: &str) -> Result<Vec<u8>, CipherError> {
        let payload = STANDARD.decode(encoded.trim())?;
        if payload.len() <= NONCE_LEN {
            return Err(CipherError::Truncated);
        }

        let (nonce, sealed) = payload.split_at(NONCE_LEN);
        Ok(self.cipher.decrypt(Nonce::from_slice(nonce), sealed)?)
    }
}

impl std::fmt::Debug for SessionCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCipher").finish_non_exhaustive()
    }
}
