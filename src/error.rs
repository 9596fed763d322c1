use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum BookshelfError {
    // Credential errors
    DuplicateEmail,
    InvalidCredentials,

    // Gate errors
    NoToken,
    RevokedToken,
    InvalidToken,

    // Resource errors
    NotFound,
    Forbidden,

    // Storage errors
    StorageError(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for BookshelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "Email already exists"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::NoToken => write!(f, "No token provided"),
            Self::RevokedToken => write!(f, "Token revoked"),
            Self::InvalidToken => write!(f, "Invalid Token"),
            Self::NotFound => write!(f, "Not found"),
            Self::Forbidden => write!(f, "Not authorized"),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for BookshelfError {}

// Generic result type for bookshelf
pub type Result<T> = std::result::Result<T, BookshelfError>;
