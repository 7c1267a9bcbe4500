use thiserror::Error;

use crate::PageLayout;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract layout: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF layout extraction backends.
///
/// Implementors turn raw PDF bytes into positioned, font-sized text boxes;
/// heading and title detection lives in `pdf_outline_parsing::OutlineExtractor`.
pub trait LayoutBackend: Send + Sync {
    /// Extract the text boxes of at most `max_pages` pages, in document order.
    fn extract_layout(&self, bytes: &[u8], max_pages: usize)
    -> Result<Vec<PageLayout>, BackendError>;
}
