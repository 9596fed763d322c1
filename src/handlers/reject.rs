//! Rejection-to-response mapping
//!
//! Domain errors travel through warp as a custom rejection and are
//! converted to an HTTP status plus a `{ "message": ... }` JSON body in
//! exactly one place. Internal failure detail stays in the log.

use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::error::BookshelfError;

/// Wrapper carrying a domain error through warp's rejection machinery
#[derive(Debug)]
pub struct ApiReject(pub BookshelfError);

impl warp::reject::Reject for ApiReject {}

/// Lift a domain error into a rejection
pub fn api(err: BookshelfError) -> Rejection {
    warp::reject::custom(ApiReject(err))
}

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

fn reply_message(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&MessageBody {
            message: message.to_string(),
        }),
        status,
    )
}

/// Convert any rejection into a JSON error response
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if let Some(ApiReject(domain_err)) = err.find::<ApiReject>() {
        let status = match domain_err {
            // Non-standard code preserved for client compatibility
            BookshelfError::DuplicateEmail => StatusCode::NOT_FOUND,
            BookshelfError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            BookshelfError::NoToken => StatusCode::UNAUTHORIZED,
            BookshelfError::RevokedToken => StatusCode::UNAUTHORIZED,
            BookshelfError::InvalidToken => StatusCode::FORBIDDEN,
            BookshelfError::NotFound => StatusCode::NOT_FOUND,
            BookshelfError::Forbidden => StatusCode::FORBIDDEN,
            BookshelfError::StorageError(detail) => {
                log::error!("Storage failure while handling request: {}", detail);
                return Ok(reply_message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                ));
            }
            BookshelfError::ConfigError(detail) => {
                log::error!("Configuration failure while handling request: {}", detail);
                return Ok(reply_message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                ));
            }
        };
        return Ok(reply_message(status, &domain_err.to_string()));
    }

    if err.is_not_found() {
        return Ok(reply_message(StatusCode::NOT_FOUND, "Not found"));
    }

    if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        return Ok(reply_message(StatusCode::BAD_REQUEST, "Invalid request body"));
    }

    if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        return Ok(reply_message(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large",
        ));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(reply_message(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
        ));
    }

    // Anything unexpected: log the cause, leak nothing to the client
    log::error!("Unhandled rejection: {:?}", err);
    Ok(reply_message(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    ))
}
