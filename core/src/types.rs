//! Message envelope exchanged between the orchestrator and provider gateways

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Finish reason reported by providers when a completion ended naturally
pub const FINISH_REASON_STOP: &str = "stop";

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role string is not one of `system`, `user` or `assistant`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A single message in a chat exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Optional sampling parameters supplied by the caller.
///
/// `None` means the provider default applies, which is not the same as an
/// explicit zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature, 0.0 to 2.0
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
}

/// A chat completion request as handed to a provider gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Append a message to the conversation
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Apply caller supplied sampling options
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.temperature = options.temperature;
        self.max_tokens = options.max_tokens;
        self
    }
}

/// One candidate completion returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A chat completion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub model: String,
    /// Unix timestamp the provider attached to the completion
    #[serde(default)]
    pub created: i64,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl ChatResponse {
    /// The canonical choice. Only the first one is ever surfaced.
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }

    /// Text of the canonical choice, empty when there is none
    pub fn content(&self) -> &str {
        self.first_choice()
            .map(|choice| choice.message.content.as_str())
            .unwrap_or_default()
    }

    /// Whether the canonical choice ended with a natural stop
    pub fn is_complete(&self) -> bool {
        self.first_choice()
            .is_some_and(|choice| choice.finish_reason == FINISH_REASON_STOP)
    }
}

/// A model offered by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub owned_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response(finish_reason: &str) -> ChatResponse {
        ChatResponse {
            id: "chatcmpl-1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            created: 1_700_000_000,
            choices: vec![Choice {
                index: 0,
                message: ChatMessage::assistant("hello"),
                finish_reason: finish_reason.to_string(),
            }],
            usage: TokenUsage {
                prompt_tokens: 5,
                completion_tokens: 3,
                total_tokens: 8,
            },
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!("system".parse::<Role>().unwrap(), Role::System);

        let err = "tool".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("tool".to_string()));
    }

    #[test]
    fn test_role_rejects_unknown_in_json() {
        let result: Result<ChatMessage, _> =
            serde_json::from_value(json!({"role": "narrator", "content": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_request_serialization_omits_unset_options() {
        let request = ChatRequest::new("m", vec![ChatMessage::user("hi")]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({"model": "m", "messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[test]
    fn test_request_keeps_explicit_zero_temperature() {
        let request = ChatRequest::new("m", vec![]).with_options(GenerationOptions {
            temperature: Some(0.0),
            max_tokens: None,
        });
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["temperature"], json!(0.0));
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn test_request_builder_appends_messages() {
        let request = ChatRequest::new("m", vec![ChatMessage::system("be brief")])
            .with_message(ChatMessage::user("hi"));

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[1].role, Role::User);
    }

    #[test]
    fn test_response_content_and_completion() {
        let response = sample_response("stop");
        assert_eq!(response.content(), "hello");
        assert!(response.is_complete());

        let truncated = sample_response("length");
        assert!(!truncated.is_complete());

        let empty = ChatResponse {
            choices: vec![],
            ..sample_response("stop")
        };
        assert_eq!(empty.content(), "");
        assert!(!empty.is_complete());
    }

    #[test]
    fn test_response_defaults_missing_usage() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "x",
            "model": "m",
            "choices": []
        }))
        .unwrap();

        assert_eq!(response.usage, TokenUsage::default());
        assert_eq!(response.created, 0);
    }
}
