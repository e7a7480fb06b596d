//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::chat::RequestError;

// Errors

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into an Axum compatible response.
///
/// Request validation problems are the caller's fault and their
/// message is returned verbatim. Everything else is logged and hidden
/// behind a generic message.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<RequestError>() {
            tracing::debug!("Rejected request: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(&err.to_string())),
            )
                .into_response();
        }

        tracing::error!("{:#}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Internal server error")),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod speak {
    pub use crate::api::routes::speak::public::*;
}
