use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::engine::Analyzer;
use crate::report::AnalysisReport;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze-tx", post(analyze_tx))
        .route("/analyze-tx/offline", post(analyze_tx_offline))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Alias kept for callers that prefer `crate::router(state)`.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

#[derive(Deserialize)]
struct AnalyzeTxReq {
    #[serde(default)]
    raw: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTxResp {
    #[serde(flatten)]
    report: AnalysisReport,
    /// Single-string view of the explanation for simple consumers.
    ai_summary: String,
}

impl From<AnalysisReport> for AnalyzeTxResp {
    fn from(report: AnalysisReport) -> Self {
        let ai_summary = report.explanation.user_body.clone();
        Self { report, ai_summary }
    }
}

#[derive(Serialize)]
struct ErrorResp {
    error: &'static str,
}

/// Missing or malformed bodies analyze as empty input.
fn raw_from_body(body: &Bytes) -> String {
    serde_json::from_slice::<AnalyzeTxReq>(body)
        .ok()
        .and_then(|r| r.raw)
        .unwrap_or_default()
}

async fn analyze_tx(State(state): State<AppState>, body: Bytes) -> Response {
    let raw = raw_from_body(&body);
    match state.analyzer.analyze(&raw).await {
        Ok(report) => {
            info!(source = report.explanation.source.as_str(), "[analyze-tx] explanation source");
            Json(AnalyzeTxResp::from(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "[analyze-tx] failed to generate AI explanation");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResp {
                    error: "Failed to generate AI explanation. Check server logs.",
                }),
            )
                .into_response()
        }
    }
}

async fn analyze_tx_offline(State(state): State<AppState>, body: Bytes) -> Json<AnalyzeTxResp> {
    let raw = raw_from_body(&body);
    Json(state.analyzer.analyze_offline(&raw).await.into())
}
