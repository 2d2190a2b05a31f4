//! Diagram and section records
//!
//! Field names are the JSON contract of the API and must not change:
//! `id, title, content, type, section` for diagrams and
//! `number, title, content_preview` for sections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters kept in a section preview
pub const PREVIEW_CHARS: usize = 100;

/// Appended to a preview when the content was cut
pub const PREVIEW_MARKER: &str = "...";

/// Notation family of a diagram body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    Graph,
    Flowchart,
    Sequence,
    Er,
    State,
    Class,
    Gantt,
    Pie,
    Unknown,
}

impl DiagramType {
    /// Short tag used in JSON and HTML
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramType::Graph => "graph",
            DiagramType::Flowchart => "flowchart",
            DiagramType::Sequence => "sequence",
            DiagramType::Er => "er",
            DiagramType::State => "state",
            DiagramType::Class => "class",
            DiagramType::Gantt => "gantt",
            DiagramType::Pie => "pie",
            DiagramType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    /// 1-based position in the store
    pub id: u32,
    pub title: String,
    /// Notation body with blank lines removed
    pub content: String,
    #[serde(rename = "type")]
    pub diagram_type: DiagramType,
    /// Number as written in the source; not unique, not contiguous
    pub section: i64,
}

/// Short summary of a diagram for navigation lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub number: i64,
    pub title: String,
    pub content_preview: String,
}

impl Section {
    pub fn summarize(diagram: &Diagram) -> Self {
        Self {
            number: diagram.section,
            title: diagram.title.clone(),
            content_preview: preview(&diagram.content),
        }
    }
}

/// First [`PREVIEW_CHARS`] characters, with [`PREVIEW_MARKER`] if cut
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], PREVIEW_MARKER),
        None => content.to_string(),
    }
}
