//! Password hashing and verification backed by bcrypt.

use std::sync::OnceLock;

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash("catequesis-no-such-account", DEFAULT_COST).ok())
        .as_deref()
}

/// Computes the dummy hash ahead of the first login so that call is not slower.
pub fn warm_dummy_hash() {
    let _ = dummy_hash();
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash.
///
/// A hash that bcrypt cannot parse is reported as a mismatch rather than an
/// error, so a corrupt directory entry behaves like a wrong password.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    match verify(password, hash) {
        Ok(valid) => Ok(valid),
        Err(bcrypt::BcryptError::InvalidHash(..)) | Err(bcrypt::BcryptError::InvalidPrefix(..)) => {
            tracing::warn!("Stored password hash is not a valid bcrypt hash");
            Ok(false)
        }
        Err(e) => Err(AppError::internal(anyhow!(
            "Failed to verify password: {}",
            e
        ))),
    }
}

/// Spends the same bcrypt work as [`verify_password`] when there is no stored
/// hash to check against (unknown or disabled account). Always a mismatch.
pub fn verify_dummy_password(password: &str) -> bool {
    if let Some(dummy) = dummy_hash() {
        let _ = verify(password, dummy);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("catecismo2024").unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(verify_password("catecismo2024", &hashed).unwrap());
        assert!(!verify_password("otra-clave", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_dummy_hash_uses_default_cost() {
        let dummy = dummy_hash().unwrap();
        assert!(dummy.starts_with(&format!("$2b${:02}$", DEFAULT_COST)));
        assert!(!verify_dummy_password("catequesis-no-such-account"));
        assert!(!verify_dummy_password("anything"));
    }

    #[test]
    fn test_verify_against_garbage_hash_is_false() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash").unwrap());
    }
}
