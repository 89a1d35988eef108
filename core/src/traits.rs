//! Ports between the transport, the orchestrator and upstream providers

use crate::errors::{ChatResult, GatewayResult};
use crate::types::{ChatRequest, ChatResponse, GenerationOptions, ModelsResponse};
use async_trait::async_trait;

/// Outbound port to an upstream completion provider.
///
/// Implementations perform exactly one network call per invocation. Dropping
/// the returned future abandons the call.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Send a chat completion request upstream
    async fn send_chat(&self, request: ChatRequest) -> GatewayResult<ChatResponse>;

    /// List the models the provider offers
    async fn list_models(&self) -> GatewayResult<ModelsResponse>;
}

/// Inbound port used by presentation adapters
#[async_trait]
pub trait ChatOrchestrator: Send + Sync {
    /// Relay a single user message, falling back to the default model when
    /// `model_override` is absent or empty
    async fn handle_user_message(
        &self,
        text: &str,
        model_override: Option<&str>,
    ) -> ChatResult<ChatResponse> {
        self.handle_user_message_with(text, model_override, GenerationOptions::default())
            .await
    }

    /// Same as [`ChatOrchestrator::handle_user_message`] with sampling options
    async fn handle_user_message_with(
        &self,
        text: &str,
        model_override: Option<&str>,
        options: GenerationOptions,
    ) -> ChatResult<ChatResponse>;

    /// List the models available upstream
    async fn list_available_models(&self) -> ChatResult<ModelsResponse>;
}
