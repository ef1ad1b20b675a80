// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

/// Opaque session token handed to the browser. Only its hash is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// URL-safe base64 (no padding) of random bytes; 32 bytes -> 43 chars.
    pub fn generate_with<R: RngCore>(rng: &mut R) -> Self {
        let mut buf = [0u8; TOKEN_BYTES];
        rng.fill_bytes(&mut buf);
        Self(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf))
    }

    pub fn from_raw(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        (!raw.is_empty()).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 of the token text, as stored in `label_sessions.token_hash`.
    pub fn hash(&self) -> [u8; 32] {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        out
    }
}
