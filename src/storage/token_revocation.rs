//! Token revocation storage
//!
//! Tracks tokens invalidated before their natural expiry so logout and
//! account deletion take effect immediately. The set lives in process
//! memory only: a restart silently un-revokes every entry, and entries
//! are never pruned. Both behaviors are deliberate and covered by tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Token revocation storage trait
///
/// Kept behind a trait so a persistent or externally shared backend can
/// replace the in-memory set without touching the authentication gate.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Add a token to the revoked set. Revoking twice is a no-op.
    async fn revoke(&self, token: &str);

    /// Check whether a token has been revoked
    async fn is_revoked(&self, token: &str) -> bool;
}

/// In-memory implementation of the revocation store
pub struct MemoryRevocationStore {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl MemoryRevocationStore {
    /// Create a new empty revocation store
    pub fn new() -> Self {
        Self {
            revoked: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn revoke(&self, token: &str) {
        let mut revoked = self.revoked.write().await;
        if revoked.insert(token.to_string()) {
            log::info!("Token revoked ({} total)", revoked.len());
        }
    }

    async fn is_revoked(&self, token: &str) -> bool {
        let revoked = self.revoked.read().await;
        revoked.contains(token)
    }
}

impl Default for MemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared reference to a revocation store
pub type SharedRevocationStore = Arc<dyn RevocationStore>;

/// Create a new memory-based revocation store
pub fn create_memory_revocation_store() -> SharedRevocationStore {
    Arc::new(MemoryRevocationStore::new())
}
