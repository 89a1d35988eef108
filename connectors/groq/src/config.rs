//! Configuration for the Groq connector

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Groq API key
    pub api_key: String,
    /// API base URL, without the endpoint path
    pub api_base: String,
    /// Total request timeout in milliseconds
    pub timeout_ms: u64,
    /// Idle connections kept per host
    pub pool_max_idle_per_host: usize,
    /// How long an idle pooled connection is kept, in milliseconds
    pub pool_idle_timeout_ms: u64,
}

impl GroqConfig {
    /// Create a new Groq config with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_ms: 30_000,
            pool_max_idle_per_host: 10,
            pool_idle_timeout_ms: 90_000,
        }
    }

    /// Set the API base URL (any OpenAI compatible endpoint works)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the idle connection pool size per host
    pub fn with_pool_max_idle_per_host(mut self, max_idle: usize) -> Self {
        self.pool_max_idle_per_host = max_idle;
        self
    }

    pub fn with_pool_idle_timeout(mut self, idle_timeout_ms: u64) -> Self {
        self.pool_idle_timeout_ms = idle_timeout_ms;
        self
    }

    /// Full URL for an endpoint path such as `/models`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self::new("") // Empty API key - must be set by user
    }
}
