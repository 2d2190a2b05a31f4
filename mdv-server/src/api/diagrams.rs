//! JSON endpoints over the diagram store

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use mdv_common::{Diagram, Section};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

const NOT_FOUND_MESSAGE: &str = "Diagram not found";

/// GET /api/diagrams
pub async fn list_diagrams(State(state): State<AppState>) -> Json<Vec<Diagram>> {
    Json(state.store.all_diagrams().to_vec())
}

/// GET /api/sections
pub async fn list_sections(State(state): State<AppState>) -> Json<Vec<Section>> {
    Json(state.store.all_sections().to_vec())
}

/// GET /api/diagram/:id
pub async fn get_diagram(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Diagram>> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    u32::try_from(id)
        .ok()
        .and_then(|id| state.store.diagram_by_id(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

/// GET /api/diagram/section/:num
pub async fn get_diagram_by_section(
    State(state): State<AppState>,
    number: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Diagram>> {
    let Path(number) = number.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .store
        .diagram_by_section(number)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

/// Build diagram and section routes
pub fn diagram_routes() -> Router<AppState> {
    Router::new()
        .route("/api/diagrams", get(list_diagrams))
        .route("/api/diagram/:id", get(get_diagram))
        .route("/api/diagram/section/:num", get(get_diagram_by_section))
        .route("/api/sections", get(list_sections))
}
