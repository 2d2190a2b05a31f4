//! Diagram store and query facade
//!
//! Built once from the configured file and never mutated afterwards, so a
//! shared `&DiagramStore` (or `Arc<DiagramStore>`) needs no locking.
//!
//! Every failure on the way to a populated store is recovered locally by
//! substituting the built-in sample set. Construction never fails.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::classify::classify;
use super::model::{Diagram, Section};
use super::sample::sample_diagrams;
use super::segment::{segment, Strategy};

/// Why the store fell back to sample data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("diagram file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read diagram file {}: {}", .path.display(), .message)]
    ReadOrParseFailure { path: PathBuf, message: String },

    #[error("diagram file is empty")]
    EmptyInput,

    #[error("no sections could be extracted")]
    NoSectionsExtracted,
}

/// Where the store's records came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Parsed from text by the given cascade stage
    File { strategy: Strategy },
    /// Built-in sample set
    Sample { reason: LoadFailure },
}

impl DataSource {
    pub fn kind(&self) -> &'static str {
        match self {
            DataSource::File { .. } => "file",
            DataSource::Sample { .. } => "sample",
        }
    }
}

/// Immutable, ordered collection of diagrams and their section summaries
#[derive(Debug, Clone)]
pub struct DiagramStore {
    diagrams: Vec<Diagram>,
    sections: Vec<Section>,
    source: DataSource,
}

impl DiagramStore {
    /// Build the store from the file at `path`, falling back to sample data
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        info!("Loading diagrams from: {}", path.display());

        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!("File loaded. Content length: {} characters", content.chars().count());
                Self::from_text(&content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Self::sample(LoadFailure::FileNotFound(path.to_path_buf()))
            }
            Err(e) => Self::sample(LoadFailure::ReadOrParseFailure {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Build the store from in-memory text, falling back to sample data
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::sample(LoadFailure::EmptyInput);
        }

        let segmentation = segment(text);
        let Some(strategy) = segmentation.strategy else {
            return Self::sample(LoadFailure::NoSectionsExtracted);
        };

        let diagrams: Vec<Diagram> = segmentation
            .sections
            .into_iter()
            .zip(1u32..)
            .map(|(raw, id)| {
                let diagram_type = classify(&raw.body);
                debug!(
                    "Parsed diagram {}: {} ({})",
                    raw.number, raw.title, diagram_type
                );
                Diagram {
                    id,
                    title: raw.title,
                    content: raw.body,
                    diagram_type,
                    section: raw.number,
                }
            })
            .collect();

        info!(
            "Successfully parsed {} diagrams using {} segmentation",
            diagrams.len(),
            strategy
        );
        Self::from_records(diagrams, DataSource::File { strategy })
    }

    /// The built-in five-entry sample store
    pub fn sample(reason: LoadFailure) -> Self {
        warn!("{}; using sample data", reason);
        let store = Self::from_records(sample_diagrams(), DataSource::Sample { reason });
        info!("Loaded sample data with {} diagrams", store.len());
        store
    }

    fn from_records(diagrams: Vec<Diagram>, source: DataSource) -> Self {
        let sections = diagrams.iter().map(Section::summarize).collect();
        Self {
            diagrams,
            sections,
            source,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }

    /// All diagrams in insertion order
    pub fn all_diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    /// Diagram with exactly this id
    pub fn diagram_by_id(&self, id: u32) -> Option<&Diagram> {
        self.diagrams.iter().find(|d| d.id == id)
    }

    /// First diagram, in order, carrying this section number
    pub fn diagram_by_section(&self, section: i64) -> Option<&Diagram> {
        self.diagrams.iter().find(|d| d.section == section)
    }

    /// Section summaries, one per diagram, in the same order
    pub fn all_sections(&self) -> &[Section] {
        &self.sections
    }

    /// Case-insensitive substring search over title and content.
    ///
    /// An empty query matches every diagram; callers that want "no query, no
    /// results" must check before calling.
    pub fn search(&self, query: &str) -> Vec<&Diagram> {
        let needle = query.to_lowercase();
        self.diagrams
            .iter()
            .filter(|d| {
                d.title.to_lowercase().contains(&needle)
                    || d.content.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagrams::model::DiagramType;

    const TWO_SECTIONS: &str = "1. Foo\n\ngraph TD\n  A-->B\n\n2. Bar\n\nflowchart LR\n  C-->D\n";

    #[test]
    fn test_from_text_two_sections() {
        let store = DiagramStore::from_text(TWO_SECTIONS);
        assert_eq!(store.source(), &DataSource::File { strategy: Strategy::Strict });
        assert_eq!(
            store.all_diagrams(),
            &[
                Diagram {
                    id: 1,
                    title: "Foo".to_string(),
                    content: "graph TD\n  A-->B".to_string(),
                    diagram_type: DiagramType::Graph,
                    section: 1,
                },
                Diagram {
                    id: 2,
                    title: "Bar".to_string(),
                    content: "flowchart LR\n  C-->D".to_string(),
                    diagram_type: DiagramType::Flowchart,
                    section: 2,
                },
            ]
        );
    }

    #[test]
    fn test_ids_dense_regardless_of_section_numbers() {
        let text = "10. A\n\ngraph TD\n\n3. B\n\npie\n\n10. C\n\ngantt\n";
        let store = DiagramStore::from_text(text);
        let ids: Vec<u32> = store.all_diagrams().iter().map(|d| d.id).collect();
        let sections: Vec<i64> = store.all_diagrams().iter().map(|d| d.section).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(sections, vec![10, 3, 10]);
    }

    #[test]
    fn test_by_section_first_match_wins() {
        let text = "10. A\n\ngraph TD\n\n3. B\n\npie\n\n10. C\n\ngantt\n";
        let store = DiagramStore::from_text(text);
        assert_eq!(store.diagram_by_section(10).map(|d| d.title.as_str()), Some("A"));
        assert_eq!(store.diagram_by_section(3).map(|d| d.id), Some(2));
        assert!(store.diagram_by_section(1).is_none());
    }

    #[test]
    fn test_by_id_total_over_range() {
        let store = DiagramStore::from_text(TWO_SECTIONS);
        assert!(store.diagram_by_id(0).is_none());
        assert_eq!(store.diagram_by_id(1).map(|d| d.title.as_str()), Some("Foo"));
        assert_eq!(store.diagram_by_id(2).map(|d| d.title.as_str()), Some("Bar"));
        assert!(store.diagram_by_id(3).is_none());
    }

    #[test]
    fn test_sections_parallel_diagrams() {
        let store = DiagramStore::from_text(TWO_SECTIONS);
        let sections = store.all_sections();
        assert_eq!(sections.len(), store.len());
        assert_eq!(sections[0].number, 1);
        assert_eq!(sections[0].title, "Foo");
        assert_eq!(sections[0].content_preview, "graph TD\n  A-->B");
    }

    #[test]
    fn test_empty_text_uses_samples() {
        for text in ["", "   \n\n\t"] {
            let store = DiagramStore::from_text(text);
            assert_eq!(store.len(), 5);
            assert_eq!(store.source(), &DataSource::Sample { reason: LoadFailure::EmptyInput });
        }
    }

    #[test]
    fn test_no_markers_uses_samples() {
        let store = DiagramStore::from_text("graph TD\n  A-->B\n");
        assert_eq!(store.all_diagrams(), sample_diagrams().as_slice());
        assert_eq!(
            store.source(),
            &DataSource::Sample { reason: LoadFailure::NoSectionsExtracted }
        );
    }

    #[test]
    fn test_from_text_paragraph_fallback() {
        let store = DiagramStore::from_text(" \n 5. Multi\nline\n\nflowchart LR\n");
        assert_eq!(store.source(), &DataSource::File { strategy: Strategy::Paragraph });
        assert_eq!(
            store.all_diagrams(),
            &[Diagram {
                id: 1,
                title: "Multi\nline".to_string(),
                content: "flowchart LR".to_string(),
                diagram_type: DiagramType::Flowchart,
                section: 5,
            }]
        );
    }

    #[test]
    fn test_blank_only_body_produces_no_diagram() {
        let store = DiagramStore::from_text("1. Blank\n\n   \n\n\n\n2. Real\n\nerDiagram\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.all_diagrams()[0].title, "Real");
        assert_eq!(store.all_diagrams()[0].id, 1);
    }

    #[test]
    fn test_search_case_insensitive() {
        let store = DiagramStore::sample(LoadFailure::EmptyInput);
        let upper: Vec<u32> = store.search("SEQUENCE").iter().map(|d| d.id).collect();
        let lower: Vec<u32> = store.search("sequence").iter().map(|d| d.id).collect();
        assert_eq!(upper, lower);
        assert_eq!(upper, vec![3]);
    }

    #[test]
    fn test_search_title_or_content() {
        let store = DiagramStore::from_text(TWO_SECTIONS);
        assert_eq!(store.search("foo").len(), 1);
        assert_eq!(store.search("c-->d").len(), 1);
        assert!(store.search("nothing like this").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let store = DiagramStore::from_text(TWO_SECTIONS);
        assert_eq!(store.search("").len(), 2);
    }

    #[test]
    fn test_load_missing_file_uses_samples() {
        let path = PathBuf::from("/nonexistent/mdv/diagrams.txt");
        let store = DiagramStore::load(&path);
        assert_eq!(store.len(), 5);
        assert_eq!(
            store.source(),
            &DataSource::Sample { reason: LoadFailure::FileNotFound(path) }
        );
    }
}
