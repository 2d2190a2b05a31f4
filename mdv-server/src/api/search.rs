//! Diagram search endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use mdv_common::Diagram;
use serde::Deserialize;

use crate::AppState;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against title and content
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q=keyword
///
/// A missing or empty `q` returns an empty array rather than every diagram.
pub async fn search_diagrams(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Diagram>> {
    if query.q.is_empty() {
        return Json(Vec::new());
    }

    let results = state.store.search(&query.q).into_iter().cloned().collect();
    Json(results)
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_diagrams))
}
