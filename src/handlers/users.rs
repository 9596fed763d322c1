//! User account handlers: signup, login, logout, delete

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::auth::{CredentialVault, TokenManager};
use crate::handlers::gate::AuthContext;
use crate::handlers::reject;
use crate::storage::SharedRevocationStore;

/// Signup and login request body
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
}

fn message(text: &str) -> warp::reply::Json {
    warp::reply::json(&MessageResponse {
        message: text.to_string(),
    })
}

/// POST /user/signup
pub async fn signup(
    body: Credentials,
    vault: Arc<CredentialVault>,
) -> Result<impl Reply, Rejection> {
    let user = vault
        .register(&body.email, &body.password)
        .await
        .map_err(reject::api)?;

    log::info!("User registered: {}", user.id);
    Ok(warp::reply::with_status(
        message("User Registered successfully"),
        StatusCode::CREATED,
    ))
}

/// POST /user/login
pub async fn login(
    body: Credentials,
    vault: Arc<CredentialVault>,
    tokens: Arc<TokenManager>,
) -> Result<impl Reply, Rejection> {
    let user = vault
        .verify(&body.email, &body.password)
        .await
        .map_err(reject::api)?;
    let token = tokens.issue(&user.id).map_err(reject::api)?;

    Ok(warp::reply::json(&TokenResponse { token }))
}

/// POST /user/logout
pub async fn logout(
    ctx: AuthContext,
    revoked: SharedRevocationStore,
) -> Result<impl Reply, Rejection> {
    revoked.revoke(&ctx.token).await;
    Ok(message("Logged out"))
}

/// POST /user/delete
pub async fn delete_user(
    ctx: AuthContext,
    vault: Arc<CredentialVault>,
    revoked: SharedRevocationStore,
) -> Result<impl Reply, Rejection> {
    vault.remove(&ctx.user_id).await.map_err(reject::api)?;
    revoked.revoke(&ctx.token).await;

    log::info!("User deleted: {}", ctx.user_id);
    Ok(message("User deleted"))
}
