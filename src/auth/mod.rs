//! Authentication module: password hashing, token issuance, credentials

pub mod password;
pub mod token;
pub mod vault;

// Re-export main components
pub use token::{extract_bearer_token, Claims, TokenManager};
pub use vault::{CredentialVault, User};
