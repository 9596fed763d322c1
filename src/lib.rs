//! Bookshelf - a token-authenticated book collection API
//!
//! This library provides the core functionality for a small multi-user
//! book API: credential storage, signed token issuance and revocation,
//! and owner-scoped CRUD persisted to flat JSON files.

pub mod auth;
pub mod books;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod storage;

// Re-export main components
pub use config::*;
pub use constants::*;
