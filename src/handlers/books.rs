//! Book resource handlers

use serde::Serialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::books::{BookPatch, BookService, NewBook};
use crate::handlers::gate::AuthContext;
use crate::handlers::reject;

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// GET /books
pub async fn list(_ctx: AuthContext, books: Arc<BookService>) -> Result<impl Reply, Rejection> {
    let all = books.list().await;
    Ok(warp::reply::json(&all))
}

/// GET /books/:id
pub async fn get(
    id: String,
    _ctx: AuthContext,
    books: Arc<BookService>,
) -> Result<impl Reply, Rejection> {
    let book = books.get(&id).await.map_err(reject::api)?;
    Ok(warp::reply::json(&book))
}

/// POST /books
pub async fn create(
    ctx: AuthContext,
    body: NewBook,
    books: Arc<BookService>,
) -> Result<impl Reply, Rejection> {
    let book = books
        .create(body, &ctx.user_id)
        .await
        .map_err(reject::api)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&book),
        StatusCode::CREATED,
    ))
}

/// PUT /books/:id
pub async fn update(
    id: String,
    ctx: AuthContext,
    body: BookPatch,
    books: Arc<BookService>,
) -> Result<impl Reply, Rejection> {
    let book = books
        .update(&id, &ctx.user_id, body)
        .await
        .map_err(reject::api)?;
    Ok(warp::reply::json(&book))
}

/// DELETE /books/:id
pub async fn delete(
    id: String,
    ctx: AuthContext,
    books: Arc<BookService>,
) -> Result<impl Reply, Rejection> {
    books
        .delete(&id, &ctx.user_id)
        .await
        .map_err(reject::api)?;

    Ok(warp::reply::json(&MessageResponse {
        message: "Book deleted successfully".to_string(),
    }))
}
