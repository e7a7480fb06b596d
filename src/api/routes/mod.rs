//! API routes module

pub mod chat;
pub mod speak;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat dispatch
        .nest("/chat", chat::router())
        // Speech fallback
        .nest("/speak", speak::router())
}
