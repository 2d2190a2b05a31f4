//! # MDV Common Library
//!
//! Shared code for the Mermaid Diagram Viewer:
//! - Diagram extraction (segmenter, classifier, sample data)
//! - The immutable diagram store and its query facade
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod diagrams;
pub mod error;

pub use diagrams::{DataSource, Diagram, DiagramStore, DiagramType, LoadFailure, Section};
pub use error::{Error, Result};
