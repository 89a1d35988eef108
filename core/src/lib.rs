//! # Relay Core
//!
//! Envelope types, ports and the chat orchestrator for the chat relay.
//! Provider connectors implement [`ProviderGateway`]; presentation adapters
//! drive a [`ChatOrchestrator`].

pub mod errors;
pub mod service;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use errors::{ChatError, GatewayError};
pub use service::ChatService;
pub use traits::{ChatOrchestrator, ProviderGateway};
pub use types::{ChatMessage, ChatRequest, ChatResponse, GenerationOptions, Role};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::service::*;
    pub use crate::traits::*;
    pub use crate::types::*;
    pub use async_trait::async_trait;
}
