//! Server configuration module
//! Handles environment-driven configuration for the bookshelf API server

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TOKEN_TTL_SECS};
use crate::error::{BookshelfError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the JSON store files
    pub data_dir: PathBuf,
    /// JWT secret for token signing/validation
    pub token_secret: String,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Allowed CORS origin, if any
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        panic!("ServerConfig::default() is not allowed for security reasons. Use ServerConfig::from_env() instead.");
    }
}

impl ServerConfig {
    /// Create a test configuration - DANGEROUS: Only for testing!
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            token_secret: "test-token-secret-0123456789-only-for-unit-tests".to_string(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            cors_origin: None,
        }
    }

    /// Validate that the signing secret meets security requirements
    fn validate_token_secret(secret: &str) -> Result<()> {
        if secret.len() < 32 {
            return Err(BookshelfError::ConfigError(
                "Token secret must be at least 32 characters long".to_string(),
            ));
        }

        // Check for insecure default or example values
        let insecure_patterns = [
            "your-secret-key",
            "change-this",
            "default",
            "secret",
            "password",
            "12345",
        ];

        for pattern in &insecure_patterns {
            if secret.contains(pattern) {
                return Err(BookshelfError::ConfigError(format!(
                    "Token secret contains insecure pattern '{}'. Please use a secure random secret generated with: openssl rand -base64 32",
                    pattern
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from environment variables if available
    pub fn from_env() -> Result<Self> {
        let host = env::var("BOOKSHELF_HOST").unwrap_or(DEFAULT_HOST.to_string());
        let port = env::var("BOOKSHELF_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = env::var("BOOKSHELF_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let token_secret = env::var("BOOKSHELF_TOKEN_SECRET")
            .or_else(|_| env::var("TOKEN_SECRET"))
            .map_err(|_| {
                BookshelfError::ConfigError(
                    "TOKEN_SECRET environment variable is required for security. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        let token_ttl_secs = env::var("BOOKSHELF_TOKEN_TTL_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        let cors_origin = env::var("BOOKSHELF_CORS_ORIGIN")
            .or_else(|_| env::var("CORS_ORIGIN"))
            .ok();

        Self::validate_token_secret(&token_secret)?;

        Ok(Self {
            host,
            port,
            data_dir,
            token_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            cors_origin,
        })
    }

    /// Path of the users store file
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(crate::constants::USERS_FILE)
    }

    /// Path of the books store file
    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(crate::constants::BOOKS_FILE)
    }
}
