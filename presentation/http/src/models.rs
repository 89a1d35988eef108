//! Wire-facing request and response bodies

use crate::error::ApiError;
use relay_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Highest accepted sampling temperature
pub const MAX_TEMPERATURE: f64 = 2.0;

/// Body of `POST /chat`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<i64>,
}

impl ChatRequestBody {
    /// Check client input and extract the sampling options
    pub fn validate(&self) -> Result<GenerationOptions, ApiError> {
        if self.message.is_empty() {
            return Err(ApiError::Validation("message must not be empty".to_string()));
        }

        let temperature = match self.temperature {
            Some(t) if !t.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&t) => {
                return Err(ApiError::Validation(
                    "temperature must be between 0 and 2".to_string(),
                ));
            }
            Some(t) => Some(t as f32),
            None => None,
        };

        let max_tokens = match self.max_tokens {
            Some(n) if n < 0 => {
                return Err(ApiError::Validation(
                    "max_tokens must be greater than or equal to 0".to_string(),
                ));
            }
            Some(n) => Some(u32::try_from(n).map_err(|_| {
                ApiError::Validation(format!("max_tokens must not exceed {}", u32::MAX))
            })?),
            None => None,
        };

        Ok(GenerationOptions {
            temperature,
            max_tokens,
        })
    }
}

/// Token counters as reported to the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<TokenUsage> for UsageInfo {
    fn from(usage: TokenUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// Successful reply to `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub success: bool,
    pub message: String,
    pub model: String,
    pub usage: UsageInfo,
}

impl From<&ChatResponse> for ChatReply {
    fn from(response: &ChatResponse) -> Self {
        Self {
            success: true,
            message: response.content().to_string(),
            model: response.model.clone(),
            usage: response.usage.into(),
        }
    }
}

/// A model as listed to the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
    pub owned_by: String,
}

/// Successful reply to `GET /models`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsReply {
    pub success: bool,
    pub models: Vec<ModelEntry>,
}

impl From<ModelsResponse> for ModelsReply {
    fn from(response: ModelsResponse) -> Self {
        Self {
            success: true,
            models: response
                .models
                .into_iter()
                .map(|model| ModelEntry {
                    // Providers expose no display name, the id doubles as one
                    name: model.id.clone(),
                    id: model.id,
                    owned_by: model.owned_by,
                })
                .collect(),
        }
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: u16,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            success: false,
            error: error.into(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: &str) -> ChatRequestBody {
        ChatRequestBody {
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        for t in [0.0, 1.0, 2.0] {
            let request = ChatRequestBody {
                temperature: Some(t),
                max_tokens: Some(0),
                ..body("hi")
            };
            let options = request.validate().unwrap();
            assert_eq!(options.temperature, Some(t as f32));
            assert_eq!(options.max_tokens, Some(0));
        }
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(body("").validate().is_err());

        for t in [-0.1, 2.01, f64::NAN] {
            let request = ChatRequestBody {
                temperature: Some(t),
                ..body("hi")
            };
            assert!(matches!(request.validate(), Err(ApiError::Validation(_))));
        }

        let request = ChatRequestBody {
            max_tokens: Some(-1),
            ..body("hi")
        };
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));

        let request = ChatRequestBody {
            max_tokens: Some(i64::from(u32::MAX) + 1),
            ..body("hi")
        };
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_unset_options_stay_unset() {
        let options = body("hi").validate().unwrap();
        assert_eq!(options, GenerationOptions::default());
    }

    #[test]
    fn test_models_reply_uses_id_as_name() {
        let reply = ModelsReply::from(ModelsResponse {
            models: vec![ModelInfo {
                id: "llama-3.3-70b-versatile".to_string(),
                owned_by: "Meta".to_string(),
            }],
        });

        assert!(reply.success);
        assert_eq!(reply.models[0].name, "llama-3.3-70b-versatile");
        assert_eq!(reply.models[0].owned_by, "Meta");
    }
}
