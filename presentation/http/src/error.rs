//! Transport errors and their HTTP mapping

use crate::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use relay_core::ChatError;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("resource not found")]
    NotFound,

    /// Orchestrator failure. Only `public` reaches the client.
    #[error("{public}: {source}")]
    Chat {
        public: &'static str,
        #[source]
        source: ChatError,
    },

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn chat(public: &'static str, source: ChatError) -> Self {
        ApiError::Chat { public, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Chat { .. } | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Chat { public, .. } => public.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Chat { source, .. } => {
                let upstream = source.gateway_error().and_then(|e| e.upstream_status());
                error!("Request failed: {} (upstream status: {:?})", self, upstream);
            }
            ApiError::Internal => error!("Request failed: {}", self),
            _ => warn!("Rejected request: {} - {}", status, self),
        }

        let body = ErrorBody::new(self.public_message(), status.as_u16());
        (status, Json(body)).into_response()
    }
}

/// Errors raised while starting or running the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
