//! Service description served at `/`

use axum::response::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub chat: &'static str,
    pub models: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Endpoints,
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Chat Relay",
        version: env!("CARGO_PKG_VERSION"),
        description: "REST relay between a chat UI and the Groq completion API",
        endpoints: Endpoints {
            chat: "POST /api/v1/chat",
            models: "GET /api/v1/models",
            health: "GET /health",
        },
    })
}
