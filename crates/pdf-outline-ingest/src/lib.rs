use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod batch;

// Re-export domain types for convenience
pub use batch::{BatchEvent, BatchProcessor, BatchSummary};
pub use pdf_outline_core::{LayoutBackend, Outline};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize outline: {0}")]
    Serialize(#[from] serde_json::Error),
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of pdf-outline-ingest)")]
    NoPdfSupport,
}

/// PDFs directly inside `input_dir`, sorted by path.
///
/// Only regular files whose extension is exactly `pdf` are returned;
/// subdirectories are not searched.
pub fn find_pdfs(input_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        let is_pdf = path.extension().and_then(|e| e.to_str()) == Some("pdf");
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

fn file_stem(pdf: &Path) -> String {
    pdf.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `<output_dir>/<stem>_outline.json`.
pub fn output_path(output_dir: &Path, pdf: &Path) -> PathBuf {
    output_dir.join(format!("{}_outline.json", file_stem(pdf)))
}

/// `<output_dir>/<stem>_outline.md`.
pub fn markdown_path(output_dir: &Path, pdf: &Path) -> PathBuf {
    output_dir.join(format!("{}_outline.md", file_stem(pdf)))
}

/// The layout backend compiled into this build.
#[cfg(feature = "pdf")]
pub fn default_backend() -> Result<Box<dyn LayoutBackend>, IngestError> {
    Ok(Box::new(pdf_outline_pdf_mupdf::MupdfBackend::new()))
}

#[cfg(not(feature = "pdf"))]
pub fn default_backend() -> Result<Box<dyn LayoutBackend>, IngestError> {
    Err(IngestError::NoPdfSupport)
}
