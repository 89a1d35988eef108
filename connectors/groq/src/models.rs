//! Groq (OpenAI compatible) API data models

use relay_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Chat Completion Request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl From<ChatRequest> for ChatCompletionRequest {
    fn from(request: ChatRequest) -> Self {
        Self {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(|message| WireMessage {
                    role: message.role.as_str().to_string(),
                    content: Some(message.content),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Message format on the wire. Content may be `null` in replies.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: Option<String>,
}

/// Chat Completion Response
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<WireChoice>,
    pub usage: Option<Usage>,
}

/// Individual choice in the response
#[derive(Debug, Deserialize)]
pub struct WireChoice {
    #[serde(default)]
    pub index: u32,
    pub message: WireMessage,
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TryFrom<ChatCompletionResponse> for ChatResponse {
    type Error = UnknownRole;

    fn try_from(response: ChatCompletionResponse) -> Result<Self, Self::Error> {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| {
                Ok(Choice {
                    index: choice.index,
                    message: ChatMessage::new(
                        choice.message.role.parse()?,
                        choice.message.content.unwrap_or_default(),
                    ),
                    finish_reason: choice.finish_reason.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, UnknownRole>>()?;

        let usage = response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse {
            id: response.id,
            model: response.model,
            created: response.created,
            choices,
            usage,
        })
    }
}

/// Model listing as returned by `GET /models`
#[derive(Debug, Deserialize)]
pub struct ModelList {
    pub data: Vec<ModelEntry>,
}

/// A single entry of the model listing
#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub owned_by: String,
}

impl From<ModelList> for ModelsResponse {
    fn from(list: ModelList) -> Self {
        ModelsResponse {
            models: list
                .data
                .into_iter()
                .map(|entry| ModelInfo {
                    id: entry.id,
                    owned_by: entry.owned_by,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_roundtrip_to_wire() {
        let request = ChatRequest::new("llama-3.3-70b-versatile", vec![ChatMessage::user("hi")])
            .with_options(GenerationOptions {
                temperature: Some(1.5),
                max_tokens: Some(64),
            });

        let wire = serde_json::to_value(ChatCompletionRequest::from(request)).unwrap();
        assert_eq!(
            wire,
            json!({
                "model": "llama-3.3-70b-versatile",
                "messages": [{"role": "user", "content": "hi"}],
                "max_tokens": 64,
                "temperature": 1.5
            })
        );
    }

    #[test]
    fn test_response_decoding_preserves_fields() {
        let body = json!({
            "id": "chatcmpl-abc",
            "object": "chat.completion",
            "created": 1_733_000_000,
            "model": "llama-3.3-70b-versatile",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "hello"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8},
            "system_fingerprint": "fp_x"
        });

        let wire: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        let response = ChatResponse::try_from(wire).unwrap();

        assert_eq!(response.model, "llama-3.3-70b-versatile");
        assert_eq!(response.content(), "hello");
        assert!(response.is_complete());
        assert_eq!(
            response.usage,
            TokenUsage {
                prompt_tokens: 5,
                completion_tokens: 3,
                total_tokens: 8
            }
        );
    }

    #[test]
    fn test_null_content_and_missing_usage() {
        let body = json!({
            "id": "x",
            "model": "m",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        });

        let wire: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        let response = ChatResponse::try_from(wire).unwrap();

        assert_eq!(response.content(), "");
        assert_eq!(response.choices[0].finish_reason, "");
        assert_eq!(response.usage, TokenUsage::default());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let body = json!({
            "id": "x",
            "model": "m",
            "choices": [{"index": 0, "message": {"role": "tool", "content": "{}"}}]
        });

        let wire: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        assert!(ChatResponse::try_from(wire).is_err());
    }

    #[test]
    fn test_model_list_conversion() {
        let body = json!({
            "object": "list",
            "data": [
                {"id": "llama-3.3-70b-versatile", "object": "model", "created": 1, "owned_by": "Meta"},
                {"id": "whisper-large-v3", "object": "model", "created": 2, "owned_by": "OpenAI"}
            ]
        });

        let list: ModelList = serde_json::from_value(body).unwrap();
        let models = ModelsResponse::from(list);

        assert_eq!(models.models.len(), 2);
        assert_eq!(models.models[1].owned_by, "OpenAI");
    }
}
