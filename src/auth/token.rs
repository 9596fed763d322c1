use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{BookshelfError, Result};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl Claims {
    /// Creates new claims for a user, valid for `ttl` from now
    pub fn new(user_id: String, ttl: Duration) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as usize)
            .unwrap_or(0);

        Self {
            sub: user_id,
            iat: now,
            exp: now + ttl.as_secs() as usize,
        }
    }
}

/// Why a token failed verification
///
/// Kept distinguishable for logging; callers outside this module only
/// see the collapsed `InvalidToken` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFault {
    Malformed,
    BadSignature,
    Expired,
}

/// Manages signed token operations
///
/// The signing secret enters only through the constructor, so swapping
/// the key-resolution strategy is local to the call site building this.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenManager {
    /// Creates a new token manager with a secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        // The validity window is [iat, exp) exactly; no grace period
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issues a signed token for the given user
    pub fn issue(&self, user_id: &str) -> Result<String> {
        let claims = Claims::new(user_id.to_string(), self.ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| BookshelfError::StorageError(format!("Failed to sign token: {}", e)))
    }

    /// Checks a token, classifying the failure mode
    pub fn check(&self, token: &str) -> std::result::Result<Claims, TokenFault> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::InvalidSignature => TokenFault::BadSignature,
                ErrorKind::ExpiredSignature => TokenFault::Expired,
                _ => TokenFault::Malformed,
            }),
        }
    }

    /// Validates a token and returns its claims
    ///
    /// All failure classes collapse to a single error so callers cannot
    /// tell (or leak) which check failed.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.check(token).map_err(|fault| {
            log::debug!("Token rejected: {:?}", fault);
            BookshelfError::InvalidToken
        })
    }
}

/// Extracts bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-signing-key-0123456789abcdef";

    #[test]
    fn test_issue_and_verify() {
        let manager = TokenManager::new(SECRET, Duration::from_secs(3600));

        let token = manager.issue("user123").unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let manager = TokenManager::new(SECRET, Duration::from_secs(3600));

        assert_eq!(
            manager.check("not.a.token").unwrap_err(),
            TokenFault::Malformed
        );
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let manager = TokenManager::new(SECRET, Duration::from_secs(3600));
        let other = TokenManager::new("a-completely-different-signing-key!!", Duration::from_secs(3600));

        let token = manager.issue("user123").unwrap();

        assert_eq!(other.check(&token).unwrap_err(), TokenFault::BadSignature);
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = TokenManager::new(SECRET, Duration::from_secs(3600));

        // Sign claims that expired an hour ago with the manager's own key
        let stale = Claims {
            sub: "user123".to_string(),
            iat: 0,
            exp: 3600,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(manager.check(&token).unwrap_err(), TokenFault::Expired);
        assert!(manager.verify(&token).is_err());
    }

    #[test]
    fn test_all_faults_collapse_to_one_error() {
        let manager = TokenManager::new(SECRET, Duration::from_secs(3600));

        let err = manager.verify("not.a.token").unwrap_err();
        assert!(matches!(err, BookshelfError::InvalidToken));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token(""), None);
    }
}
