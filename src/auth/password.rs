//! Password hashing with Argon2id
//!
//! Hashes are stored in PHC string format, salt included. Plaintext
//! passwords never leave this module's function arguments.

use argon2::password_hash::{PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use rand::rngs::OsRng;

use crate::error::{BookshelfError, Result};

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BookshelfError::StorageError(format!("Password hashing failed: {}", e)))
}

/// Check a plaintext password against a stored PHC hash string
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash is not parseable: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2").unwrap();

        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!hash.contains("hunter2"));
    }

    #[test]
    fn test_garbage_stored_hash_rejects() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }
}
