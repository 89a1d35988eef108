//! HTTP request handlers for the relay

pub mod chat;
pub mod health;
pub mod models;
pub mod root;

use crate::error::ApiError;

/// Fallback for a known path hit with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
