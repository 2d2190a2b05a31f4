//! mdv-server library - Mermaid diagram viewer
//!
//! Serves the diagram store as HTML pages and a JSON API.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use mdv_common::DiagramStore;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod render;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable diagram store, shared read-only
    pub store: Arc<DiagramStore>,
    /// Display name for HTML pages
    pub app_name: String,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: DiagramStore, app_name: impl Into<String>) -> Self {
        Self {
            store: Arc::new(store),
            app_name: app_name.into(),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::ui_routes())
        .merge(api::diagram_routes())
        .merge(api::search_routes())
        .merge(api::health_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .fallback(api::not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
