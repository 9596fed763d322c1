//! Credential vault
//!
//! User records with hashed passwords over a [`JsonStore`]. Registration
//! enforces email uniqueness; verification deliberately reports a missing
//! account and a wrong password as the same failure.

use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::error::{BookshelfError, Result};
use crate::storage::JsonStore;

/// A registered user record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-generated id: the creation time in epoch milliseconds
    pub id: String,
    pub email: String,
    /// Argon2id hash in PHC string format; never the plaintext
    pub password_hash: String,
}

/// User registration and credential verification over the users store
pub struct CredentialVault {
    store: JsonStore<User>,
    /// Verified against when the email lookup misses, so the miss path
    /// and the wrong-password path cost the same
    dummy_hash: String,
}

impl CredentialVault {
    /// Create a vault over the given users store
    pub fn new(store: JsonStore<User>) -> Result<Self> {
        let dummy_hash = hash_password("bookshelf.dummy.comparison.value")?;
        Ok(Self { store, dummy_hash })
    }

    /// Register a new user
    ///
    /// Email matching is exact and case-sensitive. The plaintext password
    /// is hashed before the record is appended and persisted.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        let password_hash = hash_password(password)?;
        let email = email.to_string();

        self.store
            .mutate(move |mut users| {
                if users.iter().any(|u| u.email == email) {
                    return Err(BookshelfError::DuplicateEmail);
                }
                let user = User {
                    id: chrono::Utc::now().timestamp_millis().to_string(),
                    email,
                    password_hash,
                };
                users.push(user.clone());
                Ok((users, user))
            })
            .await
    }

    /// Verify an email/password pair
    ///
    /// An unknown email and a wrong password both return
    /// `InvalidCredentials`; callers cannot probe which emails exist.
    pub async fn verify(&self, email: &str, password: &str) -> Result<User> {
        let users = self.store.load().await;

        match users.into_iter().find(|u| u.email == email) {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            Some(_) => Err(BookshelfError::InvalidCredentials),
            None => {
                // Burn an equivalent hash verification on the miss path
                let _ = verify_password(password, &self.dummy_hash);
                Err(BookshelfError::InvalidCredentials)
            }
        }
    }

    /// Remove a user record by id
    pub async fn remove(&self, user_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        self.store
            .mutate(move |users| {
                let remaining: Vec<User> = users.into_iter().filter(|u| u.id != user_id).collect();
                Ok((remaining, ()))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_in(dir: &tempfile::TempDir) -> CredentialVault {
        CredentialVault::new(JsonStore::new(dir.path().join("user.json"))).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let vault = vault_in(&dir);

        let user = vault.register("a@x.com", "pw1").await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert!(!user.password_hash.contains("pw1"));

        let verified = vault.verify("a@x.com", "pw1").await.unwrap();
        assert_eq!(verified.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let vault = vault_in(&dir);

        let first = vault.register("a@x.com", "pw1").await.unwrap();
        let err = vault.register("a@x.com", "pw2").await.unwrap_err();
        assert!(matches!(err, BookshelfError::DuplicateEmail));

        // First registration still verifies with its original password
        let verified = vault.verify("a@x.com", "pw1").await.unwrap();
        assert_eq!(verified.id, first.id);
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let vault = vault_in(&dir);

        vault.register("a@x.com", "pw1").await.unwrap();
        assert!(vault.register("A@X.com", "pw1").await.is_ok());
    }

    #[tokio::test]
    async fn test_miss_and_mismatch_are_indistinguishable() {
        let dir = tempfile::tempdir().unwrap();
        let vault = vault_in(&dir);
        vault.register("a@x.com", "pw1").await.unwrap();

        let mismatch = vault.verify("a@x.com", "wrong").await.unwrap_err();
        let miss = vault.verify("nobody@x.com", "pw1").await.unwrap_err();

        assert_eq!(mismatch.to_string(), miss.to_string());
    }

    #[tokio::test]
    async fn test_remove_user() {
        let dir = tempfile::tempdir().unwrap();
        let vault = vault_in(&dir);

        let user = vault.register("a@x.com", "pw1").await.unwrap();
        vault.remove(&user.id).await.unwrap();

        assert!(vault.verify("a@x.com", "pw1").await.is_err());
    }
}
