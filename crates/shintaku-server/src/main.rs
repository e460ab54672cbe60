//! Shintaku API Server
//!
//! HTTP gateway in front of the oracle generation pipeline: validates
//! card payloads, enforces per-client rate limits, builds prompts and
//! proxies generation to Gemini. The upstream credential stays on this
//! side of the wire; browsers only ever talk to this service.

mod config;
mod models;
mod ratelimit;
mod routes;
mod security;
mod services;

use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Json, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::GatewayConfig;
use ratelimit::RateLimiter;
use services::{GeminiClient, TextGenerator};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub rate_limiter: Arc<RateLimiter>,
    /// Absent when no credential is configured; the generate route
    /// then fails with a configuration error.
    pub generator: Option<Arc<dyn TextGenerator>>,
}

/// Build the full router. Split from `main` so tests can drive the
/// service without binding a socket.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::generate::router())
        .route("/health", get(health_check))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", routes::swagger::ApiDoc::openapi()),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security::security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "shintaku-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shintaku_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(GatewayConfig::from_env());
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }

    let generator: Option<Arc<dyn TextGenerator>> = config.gemini_api_key.clone().map(|key| {
        Arc::new(GeminiClient::new(key, config.gemini_model.clone())) as Arc<dyn TextGenerator>
    });
    let state = AppState {
        rate_limiter: Arc::new(RateLimiter::new(&config)),
        config: config.clone(),
        generator,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "shintaku-server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
