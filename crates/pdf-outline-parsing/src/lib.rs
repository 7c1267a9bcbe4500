use thiserror::Error;

pub mod config;
pub mod extractor;
pub mod grouping;
pub mod heuristics;
pub mod markdown;
pub mod title;

pub use config::{ConfigError, FontThresholds, ListOverride, OutlineConfig, OutlineConfigBuilder};
pub use extractor::OutlineExtractor;
pub use grouping::group_boxes_by_y;
pub use markdown::render_markdown;
pub use title::fallback_title;
// Re-export domain types from core (canonical definitions live there)
pub use pdf_outline_core::{
    BackendError, HeadingLevel, LayoutBackend, Outline, OutlineEntry, PageLayout, TextBox,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] pdf_outline_core::BackendError),
}

/// Extract the outline of an in-memory PDF with the default configuration.
///
/// Backend failures are logged and produce an empty outline titled with
/// `file_name`.
pub fn extract_outline(bytes: &[u8], file_name: &str, backend: &dyn LayoutBackend) -> Outline {
    OutlineExtractor::new().extract_from_bytes(bytes, file_name, backend)
}
