//! Configuration management for relayd

use crate::cli::Cli;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    value::Uncased,
    Figment,
};
use relay_connector_groq::{GroqConfig, DEFAULT_API_BASE};
use relay_http::HttpApiConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["relay.yaml", "relay.yml"];

/// Flat variable names accepted for compatibility with existing deployments
const LEGACY_ENV: [&str; 5] = [
    "PORT",
    "GROQ_API_KEY",
    "GROQ_BASE_URL",
    "DEFAULT_MODEL",
    "HTTP_TIMEOUT",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the relay server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Port to listen on
    pub port: u16,
    /// Interface to bind
    pub bind_host: String,
    /// Groq API key
    pub api_key: String,
    /// Upstream base URL
    pub base_url: String,
    /// Model used when a request names none
    pub default_model: String,
    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
    /// Name reported by the health check
    pub service_name: String,
    pub enable_cors: bool,
    /// Idle upstream connections kept open
    pub pool_max_idle: usize,
    /// Seconds an idle upstream connection is kept
    pub pool_idle_timeout_secs: u64,
    /// Seconds in-flight requests get to finish after a shutdown signal
    pub shutdown_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_host: "0.0.0.0".to_string(),
            api_key: String::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            default_model: "llama-3.3-70b-versatile".to_string(),
            timeout_secs: 30,
            service_name: "groq-api".to_string(),
            enable_cors: true,
            pool_max_idle: 10,
            pool_idle_timeout_secs: 90,
            shutdown_timeout_secs: 30,
        }
    }
}

impl RelayConfig {
    /// Load configuration from defaults, file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(RelayConfig::default()));

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.to_path_buf()));
                }
                figment = figment.merge(Yaml::file(path));
            }
            None => {
                if let Some(path) = DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
                    figment = figment.merge(Yaml::file(path));
                }
            }
        }

        // An empty legacy variable counts as unset
        let legacy: Vec<&str> = LEGACY_ENV
            .iter()
            .copied()
            .filter(|key| env::var(key).map_or(false, |value| !value.is_empty()))
            .collect();

        figment = figment
            .merge(Env::prefixed("RELAY_"))
            .merge(Env::raw().only(&legacy).map(legacy_key));

        figment
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(port) = args.port {
            self.port = port;
        }

        if let Some(ref model) = args.model {
            self.default_model = model.clone();
        }

        self
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::Invalid(
                "API key is required (set GROQ_API_KEY or RELAY_API_KEY)".to_string(),
            ));
        }
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid("base URL is required".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be greater than 0".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout must be greater than 0".to_string(),
            ));
        }
        if self.shutdown_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "shutdown timeout must be greater than 0".to_string(),
            ));
        }
        self.bind_address().map(|_| ())
    }

    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid bind host: {}", self.bind_host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// API key safe for logs
    pub fn masked_api_key(&self) -> String {
        let key = &self.api_key;
        if key.chars().count() <= 8 {
            return "***".to_string();
        }
        let head: String = key.chars().take(4).collect();
        let tail: String = key.chars().skip(key.chars().count() - 4).collect();
        format!("{}...{}", head, tail)
    }

    pub fn groq_config(&self) -> GroqConfig {
        GroqConfig::new(self.api_key.clone())
            .with_api_base(self.base_url.clone())
            .with_timeout(self.timeout_secs.saturating_mul(1000))
            .with_pool_max_idle_per_host(self.pool_max_idle)
            .with_pool_idle_timeout(self.pool_idle_timeout_secs.saturating_mul(1000))
    }

    pub fn http_config(&self) -> Result<HttpApiConfig, ConfigError> {
        Ok(HttpApiConfig {
            bind_address: self.bind_address()?,
            enable_cors: self.enable_cors,
            service_name: self.service_name.clone(),
            drain_timeout: Duration::from_secs(self.shutdown_timeout_secs),
        })
    }
}

fn legacy_key(key: &figment::value::UncasedStr) -> Uncased<'_> {
    let mapped = match key.as_str().to_ascii_uppercase().as_str() {
        "PORT" => "port",
        "GROQ_API_KEY" => "api_key",
        "GROQ_BASE_URL" => "base_url",
        "DEFAULT_MODEL" => "default_model",
        "HTTP_TIMEOUT" => "timeout_secs",
        _ => return Uncased::from(key.as_str()),
    };
    Uncased::from(mapped)
}
