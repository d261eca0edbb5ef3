//! Analysis Routes
//!
//! The service banner, the main `/analyze` endpoint, and the health check.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use analysis_core::{AnalysisRequest, CompetitorIntelligence};

use crate::{AppError, AppState, VERSION};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/analyze", post(analyze_competitor))
        .route("/health", get(health_check))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "CompetiScope Agent is running!",
        "version": VERSION,
        "status": "healthy",
        "capabilities": [
            "competitor_analysis",
            "market_intelligence",
            "swot_analysis",
            "telex_integration",
        ],
    }))
}

async fn analyze_competitor(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<CompetitorIntelligence>, AppError> {
    tracing::info!("Analyzing competitor: {}", request.company);

    let result = state
        .orchestrator
        .get_comprehensive_analysis(request)
        .await?;

    tracing::info!("Analysis completed for {}", result.company);
    Ok(Json(result))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    cache_size: usize,
    gemini_configured: bool,
    version: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        cache_size: state.orchestrator.cache_size(),
        gemini_configured: state.gemini_configured,
        version: VERSION,
    })
}
