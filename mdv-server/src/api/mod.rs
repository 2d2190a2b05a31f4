//! HTTP API handlers for mdv-server

pub mod buildinfo;
pub mod diagrams;
pub mod health;
pub mod search;
pub mod ui;

pub use buildinfo::get_build_info;
pub use diagrams::diagram_routes;
pub use health::health_routes;
pub use search::search_routes;
pub use ui::{not_found_page, ui_routes};
