//! HTTP surface for inference and benchmark validation.
//!
//! Validation and inference failures are reported in-band as
//! `{"error": "..."}` with a 200 status.

use crate::adapters::scoring::to_ai_map;
use crate::core::validation::ValidationPipeline;
use crate::domain::model::{BenchmarkRecord, ValidationResult};
use crate::domain::ports::ScoringProvider;
use crate::utils::error::Result;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ValidationPipeline>,
    pub scorer: Arc<dyn ScoringProvider>,
    pub precision: u32,
}

#[derive(Debug, Deserialize)]
pub struct InferenceRequest {
    pub sequence: String,
    #[serde(default)]
    pub pdb_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InferenceResponse {
    pub ai_map: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Ok(T),
    Error(ErrorBody),
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub scorer: String,
    pub benchmarks: usize,
    pub timestamp: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/inference", post(inference_handler))
        .route("/benchmarks", get(benchmarks_handler))
        .route("/validate/:pdb_id", get(validate_handler))
        // 舊版前端使用的路徑
        .route("/api/runaiinference", post(inference_handler))
        .route("/api/benchmarks", get(benchmarks_handler))
        .route("/api/validate/:pdb_id", get(validate_handler))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = router(state);

    tracing::info!("🌐 EWCL service listening on http://{}", addr);
    tracing::info!("  - Inference:  POST http://{}/inference", addr);
    tracing::info!("  - Benchmarks: GET  http://{}/benchmarks", addr);
    tracing::info!("  - Validate:   GET  http://{}/validate/{{pdb_id}}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 EWCL service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        scorer: state.scorer.name().to_string(),
        benchmarks: state.pipeline.catalog().len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn inference_handler(
    State(state): State<AppState>,
    Json(request): Json<InferenceRequest>,
) -> Json<ApiResponse<InferenceResponse>> {
    if let Some(pdb_text) = &request.pdb_text {
        tracing::debug!("pdb_text supplied ({} bytes), not used for scoring", pdb_text.len());
    }

    match state.scorer.score(&request.sequence).await {
        Ok(scores) => {
            tracing::debug!("🧮 Scored {} residues", scores.len());
            Json(ApiResponse::Ok(InferenceResponse {
                ai_map: to_ai_map(&scores, state.precision),
            }))
        }
        Err(e) => {
            tracing::warn!("⚠️ Inference failed: {}", e);
            Json(ApiResponse::Error(ErrorBody {
                error: format!("Inference failed: {}", e),
            }))
        }
    }
}

async fn benchmarks_handler(State(state): State<AppState>) -> Json<Vec<BenchmarkRecord>> {
    Json(state.pipeline.catalog().list().to_vec())
}

async fn validate_handler(
    State(state): State<AppState>,
    Path(pdb_id): Path<String>,
) -> Json<ApiResponse<ValidationResult>> {
    match state.pipeline.validate(&pdb_id).await {
        Ok(result) => Json(ApiResponse::Ok(result)),
        Err(e) => Json(ApiResponse::Error(ErrorBody {
            error: e.to_string(),
        })),
    }
}
