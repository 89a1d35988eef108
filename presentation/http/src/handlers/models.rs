//! Model listing handler

use crate::error::ApiError;
use crate::models::ModelsReply;
use crate::AppState;
use axum::{extract::State, response::Json};

pub async fn list_models(State(state): State<AppState>) -> Result<Json<ModelsReply>, ApiError> {
    let models = state
        .orchestrator
        .list_available_models()
        .await
        .map_err(|e| ApiError::chat("failed to fetch models", e))?;

    Ok(Json(ModelsReply::from(models)))
}
