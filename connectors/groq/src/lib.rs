//! Groq connector implementing the relay's provider gateway

use async_trait::async_trait;
use relay_core::prelude::*;
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

mod config;
mod models;

pub use config::{GroqConfig, DEFAULT_API_BASE};
use models::*;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const MODELS_PATH: &str = "/models";

/// Groq implementation of ProviderGateway
#[derive(Debug, Clone)]
pub struct GroqConnector {
    client: Client,
    config: GroqConfig,
}

impl GroqConnector {
    /// Create a new Groq connector
    pub fn new(config: GroqConfig) -> Result<Self, GatewayError> {
        if config.api_key.is_empty() {
            return Err(GatewayError::Config("API key must not be empty".to_string()));
        }
        if config.api_base.is_empty() {
            return Err(GatewayError::Config("API base URL must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_millis(config.pool_idle_timeout_ms))
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Issue one request and decode a successful body into `T`
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&ChatCompletionRequest>,
    ) -> Result<T, GatewayError> {
        let url = self.config.endpoint(path);
        debug!("Calling Groq: {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Groq rejected {} with status {}", url, status);
            debug!("Groq error body: {}", text);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| GatewayError::MalformedResponse(format!("Failed to parse response: {}", e)))
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Unreachable(format!("HTTP request failed: {}", error))
    }
}

#[async_trait]
impl ProviderGateway for GroqConnector {
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse, GatewayError> {
        let start_time = Instant::now();
        let wire_request = ChatCompletionRequest::from(request);

        let wire_response: ChatCompletionResponse = self
            .execute(Method::POST, CHAT_COMPLETIONS_PATH, Some(&wire_request))
            .await?;

        let response = ChatResponse::try_from(wire_response)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        info!(
            "Groq completion for {} finished in {}ms",
            wire_request.model,
            start_time.elapsed().as_millis()
        );

        Ok(response)
    }

    async fn list_models(&self) -> Result<ModelsResponse, GatewayError> {
        let list: ModelList = self.execute(Method::GET, MODELS_PATH, None).await?;
        debug!("Groq offers {} models", list.data.len());
        Ok(list.into())
    }
}
