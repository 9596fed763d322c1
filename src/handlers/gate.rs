//! Authentication gate
//!
//! Per-request filter admitting only requests carrying a valid, unrevoked
//! bearer token. Check order matters: missing token, then revocation,
//! then signature/expiry. Admitted requests carry the verified identity
//! and the raw token, which logout and account deletion revoke later.

use std::sync::Arc;
use warp::{Filter, Rejection};

use crate::auth::token::{extract_bearer_token, TokenManager};
use crate::error::BookshelfError;
use crate::handlers::reject;
use crate::storage::SharedRevocationStore;

/// Identity bound to an admitted request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub token: String,
}

/// Filter that admits authenticated requests and rejects the rest
///
/// Missing token maps to 401, revoked to 401, failed verification to 403.
pub fn authenticated(
    tokens: Arc<TokenManager>,
    revoked: SharedRevocationStore,
) -> impl Filter<Extract = (AuthContext,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |header: Option<String>| {
        let tokens = Arc::clone(&tokens);
        let revoked = Arc::clone(&revoked);
        async move {
            let token = header
                .as_deref()
                .and_then(extract_bearer_token)
                .ok_or_else(|| reject::api(BookshelfError::NoToken))?;

            if revoked.is_revoked(&token).await {
                return Err(reject::api(BookshelfError::RevokedToken));
            }

            let claims = tokens.verify(&token).map_err(reject::api)?;

            Ok::<AuthContext, Rejection>(AuthContext {
                user_id: claims.sub,
                token,
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::create_memory_revocation_store;
    use std::time::Duration;

    fn manager() -> Arc<TokenManager> {
        Arc::new(TokenManager::new(
            "gate-test-signing-key-0123456789abcdef",
            Duration::from_secs(3600),
        ))
    }

    #[tokio::test]
    async fn test_admits_valid_token() {
        let tokens = manager();
        let revoked = create_memory_revocation_store();
        let token = tokens.issue("user123").unwrap();

        let filter = authenticated(tokens, revoked);
        let ctx = warp::test::request()
            .header("authorization", format!("Bearer {}", token))
            .filter(&filter)
            .await
            .unwrap();

        assert_eq!(ctx.user_id, "user123");
        assert_eq!(ctx.token, token);
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        let filter = authenticated(manager(), create_memory_revocation_store());

        let result = warp::test::request().filter(&filter).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_non_bearer_header() {
        let filter = authenticated(manager(), create_memory_revocation_store());

        let result = warp::test::request()
            .header("authorization", "Basic dXNlcjpwdw==")
            .filter(&filter)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_revoked_token_before_verification() {
        let tokens = manager();
        let revoked = create_memory_revocation_store();
        let token = tokens.issue("user123").unwrap();
        revoked.revoke(&token).await;

        let filter = authenticated(tokens, revoked);
        let result = warp::test::request()
            .header("authorization", format!("Bearer {}", token))
            .filter(&filter)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_token_signed_elsewhere() {
        let other = TokenManager::new(
            "some-entirely-different-signing-key!",
            Duration::from_secs(3600),
        );
        let token = other.issue("user123").unwrap();

        let filter = authenticated(manager(), create_memory_revocation_store());
        let result = warp::test::request()
            .header("authorization", format!("Bearer {}", token))
            .filter(&filter)
            .await;

        assert!(result.is_err());
    }
}
