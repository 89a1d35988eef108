//! HTTP presentation layer for the chat relay
//!
//! Binds the browser facing REST surface to a [`ChatOrchestrator`]:
//! JSON decoding, input validation, error to status mapping and a panic
//! boundary around every request.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use relay_core::ChatOrchestrator;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

mod error;
mod handlers;
mod middleware;
mod models;

pub use error::{ApiError, ServerError};
pub use handlers::health::HealthStatus;
pub use middleware::REQUEST_ID_HEADER;
pub use models::*;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable permissive CORS for browser clients
    pub enable_cors: bool,
    /// Name reported by the health check
    pub service_name: String,
    /// How long in-flight requests may run once shutdown starts
    pub drain_timeout: Duration,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_cors: true,
            service_name: "groq-api".to_string(),
            drain_timeout: Duration::from_secs(30),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<dyn ChatOrchestrator>,
    pub service_name: Arc<str>,
}

/// The relay's HTTP front end
pub struct HttpApi {
    config: HttpApiConfig,
    orchestrator: Arc<dyn ChatOrchestrator>,
}

impl HttpApi {
    pub fn new(config: HttpApiConfig, orchestrator: Arc<dyn ChatOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn config(&self) -> &HttpApiConfig {
        &self.config
    }

    /// Build the Axum router with all routes
    pub fn router(&self) -> Router {
        let state = AppState {
            orchestrator: self.orchestrator.clone(),
            service_name: Arc::from(self.config.service_name.as_str()),
        };

        let chat = || post(handlers::chat::send_message).fallback(handlers::method_not_allowed);
        let models = || get(handlers::models::list_models).fallback(handlers::method_not_allowed);

        let mut router = Router::new()
            .route(
                "/",
                get(handlers::root::service_info).fallback(handlers::method_not_allowed),
            )
            .route(
                "/health",
                get(handlers::health::health_check).fallback(handlers::method_not_allowed),
            )
            .route("/chat", chat())
            .route("/api/v1/chat", chat())
            .route("/models", models())
            .route("/api/v1/models", models())
            .fallback(handlers::not_found)
            .with_state(state);

        // Outermost first. Panics are converted before logging sees the response.
        let service_builder = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(from_fn(middleware::request_logging))
            .layer(CatchPanicLayer::custom(middleware::handle_panic));

        router = router.layer(service_builder);

        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self.config.bind_address;
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Serve requests on `listener` until `shutdown` resolves, then give
    /// in-flight requests up to `drain_timeout` to finish
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let drain_timeout = self.config.drain_timeout;

        if let Ok(addr) = listener.local_addr() {
            info!("HTTP API listening on {}", addr);
        }

        let (draining_tx, draining_rx) = oneshot::channel();
        let signal = async move {
            shutdown.await;
            let _ = draining_tx.send(());
        };

        let server = axum::serve(listener, router)
            .with_graceful_shutdown(signal)
            .into_future();
        tokio::pin!(server);

        let deadline = async {
            if draining_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(drain_timeout).await;
        };

        tokio::select! {
            result = &mut server => result?,
            _ = deadline => {
                warn!(
                    "In-flight requests still running after {:?}, stopping anyway",
                    drain_timeout
                );
            }
        }

        info!("HTTP API stopped");
        Ok(())
    }
}
