//! Router for the speech API

use axum::{Json, Router, body::Bytes, extract::State, routing::post};

use super::public;
use crate::api::state::SharedState;

/// Always succeeds. Bodies that can't be read get the persona's
/// greeting back instead.
async fn speak_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Json<public::SpeakResponse> {
    let text = match serde_json::from_slice::<public::SpeakRequest>(&body) {
        Ok(req) => req.text(),
        Err(e) => {
            tracing::debug!("Unreadable speak request, using greeting: {}", e);
            state.dispatcher.greeting().to_string()
        }
    };

    Json(public::SpeakResponse::new(&text))
}

/// Create the speech router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(speak_handler))
}
