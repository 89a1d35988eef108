//! relayd: chat relay between a browser UI and the Groq completion API

use clap::Parser;
use relay_connector_groq::GroqConnector;
use relay_core::{ChatService, GatewayError};
use relay_http::{HttpApi, ServerError};
use std::process;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::Cli;
use config::{ConfigError, RelayConfig};

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    init_logging(args.verbose);

    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => debug!("No .env file found, using the process environment"),
    }

    // Load configuration
    let config = match RelayConfig::load(args.config.as_deref()) {
        Ok(config) => config.with_overrides(&args),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!("relayd failed: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over the `-v` count
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(config: RelayConfig) -> Result<(), StartupError> {
    config.validate()?;

    info!(
        "Configuration loaded: port={} base_url={} default_model={} timeout={}s api_key={}",
        config.port,
        config.base_url,
        config.default_model,
        config.timeout_secs,
        config.masked_api_key()
    );

    let connector = GroqConnector::new(config.groq_config())?;
    let service = ChatService::new(Arc::new(connector), config.default_model.clone());
    let api = HttpApi::new(config.http_config()?, Arc::new(service));

    let listener = api.bind().await?;
    info!(
        "Serving POST /api/v1/chat, GET /api/v1/models and GET /health on {}",
        api.config().bind_address
    );

    api.serve(listener, shutdown_signal()).await?;

    info!("relayd stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
