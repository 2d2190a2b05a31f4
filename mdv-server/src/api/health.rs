//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use mdv_common::diagrams::Strategy;
use mdv_common::DataSource;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    pub diagram_count: usize,
    /// "file" when parsed from the configured file, "sample" on fallback
    pub source: String,
    /// Segmentation stage that produced the diagrams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// Why the sample set is in use, if it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let source = state.store.source();
    let (strategy, fallback_reason) = match source {
        DataSource::File { strategy } => (Some(*strategy), None),
        DataSource::Sample { reason } => (None, Some(reason.to_string())),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "mdv-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        diagram_count: state.store.len(),
        source: source.kind().to_string(),
        strategy,
        fallback_reason,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
