//! Diagram extraction and storage
//!
//! Control flow: the segmenter runs once over the file text, each extracted
//! body is classified, and the results populate the store. The sample set
//! replaces everything when no diagram can be produced.

pub mod classify;
pub mod model;
pub mod sample;
pub mod segment;
pub mod store;

pub use classify::classify;
pub use model::{preview, Diagram, DiagramType, Section};
pub use sample::sample_diagrams;
pub use segment::{segment, RawSection, Segmentation, Strategy};
pub use store::{DataSource, DiagramStore, LoadFailure};
