//! HTML page routes
//!
//! Unknown diagrams and unknown paths render the placeholder diagram page
//! with status 404.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use mdv_common::Diagram;
use tracing::debug;

use crate::render::{self, PageContext};
use crate::AppState;

const APP_JS: &str = include_str!("../../ui/app.js");

fn page_context(state: &AppState) -> PageContext<'_> {
    PageContext {
        app_name: &state.app_name,
        nav: state.store.all_diagrams(),
    }
}

fn not_found(state: &AppState, message: &str) -> Response {
    let html = render::diagram_page(&page_context(state), &render::not_found_diagram(), Some(message));
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

fn show(state: &AppState, diagram: Option<&Diagram>) -> Response {
    match diagram {
        Some(diagram) => Html(render::diagram_page(&page_context(state), diagram, None)).into_response(),
        None => not_found(state, "Diagram not found"),
    }
}

/// GET /
pub async fn serve_index(State(state): State<AppState>) -> Html<String> {
    let ctx = page_context(&state);
    Html(render::index_page(
        &ctx,
        state.store.all_sections(),
        state.store.all_diagrams().first(),
    ))
}

/// GET /diagrams
pub async fn serve_list(State(state): State<AppState>) -> Html<String> {
    Html(render::list_page(&page_context(&state), state.store.all_diagrams()))
}

/// GET /diagram/:id
pub async fn serve_diagram(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let diagram = id
        .ok()
        .and_then(|Path(id)| u32::try_from(id).ok())
        .and_then(|id| state.store.diagram_by_id(id));
    show(&state, diagram)
}

/// GET /diagram/section/:num
pub async fn serve_diagram_by_section(
    State(state): State<AppState>,
    number: Result<Path<i64>, PathRejection>,
) -> Response {
    let diagram = number
        .ok()
        .and_then(|Path(number)| state.store.diagram_by_section(number));
    show(&state, diagram)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// Fallback for unmatched paths
pub async fn not_found_page(State(state): State<AppState>, uri: axum::http::Uri) -> Response {
    debug!("No route for {}", uri);
    not_found(&state, &format!("Page not found: {}", uri.path()))
}

/// Build HTML page routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(serve_index))
        .route("/diagrams", get(serve_list))
        .route("/diagram/:id", get(serve_diagram))
        .route("/diagram/section/:num", get(serve_diagram_by_section))
        .route("/static/app.js", get(serve_app_js))
}
