//! CompetiScope HTTP surface.
//!
//! Routes: `GET /` (banner), `POST /analyze`, `POST /webhook/telex`,
//! `GET /health`. Everything stateful lives in the orchestrator; this crate
//! only wires configuration, routing, and error mapping.

mod analyze_routes;
mod chat;
mod webhook_routes;

use analysis_core::AnalysisError;
use analysis_orchestrator::AnalysisOrchestrator;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use data_sources::SimulatedDataSource;
use llm_client::GeminiClient;
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub cache_ttl_seconds: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| llm_client::DEFAULT_MODEL.to_string()),
            cache_ttl_seconds: std::env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub gemini_configured: bool,
}

/// Handler error wrapper. Validation failures map to 400 with their
/// message; everything else becomes a 500 with a generic message (the
/// cause is logged, never echoed to the caller).
pub struct AppError(pub AnalysisError);

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AnalysisError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => {
                tracing::error!("Request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Analysis failed".to_string(),
                )
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(analyze_routes::routes())
        .merge(webhook_routes::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api_server=info,analysis_orchestrator=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let gemini_configured = !config.gemini_api_key.is_empty();
    if !gemini_configured {
        tracing::warn!("GEMINI_API_KEY is not set; analysis requests will fail");
    }

    let provider = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        Arc::new(SimulatedDataSource::new()),
        provider,
        config.cache_ttl_seconds,
    ));

    let state = AppState {
        orchestrator,
        gemini_configured,
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("CompetiScope agent listening on {}", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
