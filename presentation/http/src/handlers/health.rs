//! Health check handlers

use crate::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Unix timestamp in seconds
    pub timestamp: i64,
    pub service: String,
}

/// Health check endpoint. Liveness only, the upstream is not probed.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        service: state.service_name.to_string(),
    })
}
