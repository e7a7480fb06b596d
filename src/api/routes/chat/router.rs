//! Router for the chat API

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use tracing::Instrument;

use super::public;
use crate::api::state::SharedState;

/// Answer a chat message using the first provider that responds or
/// the offline tables
async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<public::ChatResponse>, crate::api::public::ApiError> {
    let request = public::ChatRequest::parse(&body, state.config.max_message_length)?;

    let request_id = uuid::Uuid::new_v4();
    let reply = state
        .dispatcher
        .dispatch(&request)
        .instrument(tracing::info_span!("chat", %request_id))
        .await?;

    Ok(Json(reply))
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
