//! Chat relay handler

use crate::error::ApiError;
use crate::models::{ChatReply, ChatRequestBody};
use crate::AppState;
use axum::{body::Bytes, extract::State, response::Json};
use tracing::debug;

/// Relay a user message upstream.
///
/// The body is decoded by hand so that every malformed payload maps to `400`
/// regardless of the `Content-Type` the browser sent.
pub async fn send_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, ApiError> {
    let request: ChatRequestBody = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("invalid JSON: {}", e)))?;
    let options = request.validate()?;

    debug!(
        "Chat request for model {:?} ({} chars)",
        request.model,
        request.message.len()
    );

    let response = state
        .orchestrator
        .handle_user_message_with(&request.message, request.model.as_deref(), options)
        .await
        .map_err(|e| ApiError::chat("failed to process message", e))?;

    Ok(Json(ChatReply::from(&response)))
}
