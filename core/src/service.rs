//! Chat orchestration: validation, default model selection and delegation

use crate::errors::{ChatError, ChatResult};
use crate::traits::{ChatOrchestrator, ProviderGateway};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, GenerationOptions, ModelsResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Default [`ChatOrchestrator`] backed by a single provider gateway
#[derive(Clone)]
pub struct ChatService {
    gateway: Arc<dyn ProviderGateway>,
    default_model: String,
}

impl ChatService {
    /// Create a chat service over the given gateway
    pub fn new(gateway: Arc<dyn ProviderGateway>, default_model: impl Into<String>) -> Self {
        Self {
            gateway,
            default_model: default_model.into(),
        }
    }

    fn resolve_model<'a>(&'a self, model_override: Option<&'a str>) -> ChatResult<&'a str> {
        let model = model_override
            .filter(|model| !model.is_empty())
            .unwrap_or(self.default_model.as_str());

        if model.is_empty() {
            return Err(ChatError::EmptyModel);
        }
        Ok(model)
    }
}

#[async_trait]
impl ChatOrchestrator for ChatService {
    async fn handle_user_message_with(
        &self,
        text: &str,
        model_override: Option<&str>,
        options: GenerationOptions,
    ) -> ChatResult<ChatResponse> {
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let model = self.resolve_model(model_override)?;

        debug!("Relaying user message to model {}", model);

        let request = ChatRequest::new(model, vec![ChatMessage::user(text)]).with_options(options);

        let response = self
            .gateway
            .send_chat(request)
            .await
            .map_err(|e| ChatError::gateway("failed to get chat completion", e))?;

        if response.choices.is_empty() {
            return Err(ChatError::EmptyResponse);
        }

        info!(
            "Chat completion {} from {} used {} tokens",
            response.id, response.model, response.usage.total_tokens
        );

        Ok(response)
    }

    async fn list_available_models(&self) -> ChatResult<ModelsResponse> {
        self.gateway
            .list_models()
            .await
            .map_err(|e| ChatError::gateway("failed to list models", e))
    }
}
