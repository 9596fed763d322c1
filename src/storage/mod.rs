//! Storage mechanisms for persisting records and tracking revoked tokens

pub mod json_store;
pub mod token_revocation;

// Re-export main components
pub use json_store::JsonStore;
pub use token_revocation::{
    create_memory_revocation_store, MemoryRevocationStore, RevocationStore, SharedRevocationStore,
};
