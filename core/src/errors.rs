//! Error types for relay operations

use thiserror::Error;

/// Errors raised by a provider gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway configuration error: {0}")]
    Config(String),

    #[error("Upstream rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    #[error("Timeout waiting for upstream")]
    Timeout,

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Upstream HTTP status, if the provider answered with one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GatewayError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised by the chat orchestrator
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("model must not be empty")]
    EmptyModel,

    #[error("upstream response contained no choices")]
    EmptyResponse,

    #[error("{context}: {source}")]
    Gateway {
        context: &'static str,
        #[source]
        source: GatewayError,
    },
}

impl ChatError {
    pub(crate) fn gateway(context: &'static str, source: GatewayError) -> Self {
        ChatError::Gateway { context, source }
    }

    /// The underlying gateway failure, if this error wraps one
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            ChatError::Gateway { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type alias for orchestrator operations
pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_gateway_error_preserves_cause() {
        let err = ChatError::gateway(
            "failed to get chat completion",
            GatewayError::Rejected {
                status: 429,
                body: "slow down".to_string(),
            },
        );

        assert_eq!(err.gateway_error().and_then(|e| e.upstream_status()), Some(429));
        let source = err.source().unwrap();
        assert!(source.to_string().contains("429"));
        assert!(err.to_string().starts_with("failed to get chat completion"));
    }

    #[test]
    fn test_non_gateway_errors_have_no_cause() {
        assert!(ChatError::EmptyMessage.gateway_error().is_none());
        assert!(GatewayError::Timeout.upstream_status().is_none());
    }
}
