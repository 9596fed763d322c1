// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Durable store locations, relative to the data directory
pub const DEFAULT_DATA_DIR: &str = "data";
pub const USERS_FILE: &str = "user.json";
pub const BOOKS_FILE: &str = "books.json";

// Token lifetime in seconds (24 hours)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86400;

// Request body cap in bytes (16 KiB)
pub const MAX_BODY_BYTES: u64 = 16 * 1024;
