//! Request handlers and route composition for the HTTP API

pub mod books;
pub mod gate;
pub mod reject;
pub mod users;

use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

use crate::auth::{CredentialVault, TokenManager};
use crate::books::BookService;
use crate::constants::MAX_BODY_BYTES;
use crate::storage::SharedRevocationStore;

// Re-export the gate output type
pub use gate::AuthContext;

/// JSON body extraction with the request size cap applied
fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

// Helper functions to include shared state in requests

fn with_vault(
    vault: Arc<CredentialVault>,
) -> impl Filter<Extract = (Arc<CredentialVault>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&vault))
}

fn with_books(
    books: Arc<BookService>,
) -> impl Filter<Extract = (Arc<BookService>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&books))
}

fn with_tokens(
    tokens: Arc<TokenManager>,
) -> impl Filter<Extract = (Arc<TokenManager>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&tokens))
}

fn with_revoked(
    revoked: SharedRevocationStore,
) -> impl Filter<Extract = (SharedRevocationStore,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&revoked))
}

/// All API routes, without rejection recovery
pub fn routes(
    vault: Arc<CredentialVault>,
    books_service: Arc<BookService>,
    tokens: Arc<TokenManager>,
    revoked: SharedRevocationStore,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let gate = gate::authenticated(Arc::clone(&tokens), Arc::clone(&revoked));

    let signup = warp::path!("user" / "signup")
        .and(warp::post())
        .and(json_body())
        .and(with_vault(Arc::clone(&vault)))
        .and_then(users::signup);

    let login = warp::path!("user" / "login")
        .and(warp::post())
        .and(json_body())
        .and(with_vault(Arc::clone(&vault)))
        .and(with_tokens(Arc::clone(&tokens)))
        .and_then(users::login);

    let logout = warp::path!("user" / "logout")
        .and(warp::post())
        .and(gate.clone())
        .and(with_revoked(Arc::clone(&revoked)))
        .and_then(users::logout);

    let delete_user = warp::path!("user" / "delete")
        .and(warp::post())
        .and(gate.clone())
        .and(with_vault(Arc::clone(&vault)))
        .and(with_revoked(Arc::clone(&revoked)))
        .and_then(users::delete_user);

    let list_books = warp::path!("books")
        .and(warp::get())
        .and(gate.clone())
        .and(with_books(Arc::clone(&books_service)))
        .and_then(books::list);

    let create_book = warp::path!("books")
        .and(warp::post())
        .and(gate.clone())
        .and(json_body())
        .and(with_books(Arc::clone(&books_service)))
        .and_then(books::create);

    let get_book = warp::path!("books" / String)
        .and(warp::get())
        .and(gate.clone())
        .and(with_books(Arc::clone(&books_service)))
        .and_then(books::get);

    let update_book = warp::path!("books" / String)
        .and(warp::put())
        .and(gate.clone())
        .and(json_body())
        .and(with_books(Arc::clone(&books_service)))
        .and_then(books::update);

    let delete_book = warp::path!("books" / String)
        .and(warp::delete())
        .and(gate)
        .and(with_books(books_service))
        .and_then(books::delete);

    let health = warp::path!("health").and(warp::get()).map(|| "OK");

    signup
        .or(login)
        .or(logout)
        .or(delete_user)
        .or(list_books)
        .or(create_book)
        .or(get_book)
        .or(update_book)
        .or(delete_book)
        .or(health)
}

/// The full application filter: routes plus rejection recovery
pub fn app(
    vault: Arc<CredentialVault>,
    books_service: Arc<BookService>,
    tokens: Arc<TokenManager>,
    revoked: SharedRevocationStore,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    routes(vault, books_service, tokens, revoked).recover(reject::handle_rejection)
}
