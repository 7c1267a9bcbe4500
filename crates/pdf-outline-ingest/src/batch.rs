use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pdf_outline_core::{LayoutBackend, Outline};
use pdf_outline_parsing::{OutlineExtractor, ParsingError, render_markdown};

use crate::{IngestError, find_pdfs, markdown_path, output_path};

/// Progress reported while a directory is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// The input directory holds no PDFs (or does not exist).
    NoPdfs,
    /// `pdf_name` could not be parsed; an empty outline is written for it
    /// and a `Processed` event follows.
    ExtractionFailed { pdf_name: String, error: String },
    /// An outline was written for `pdf_name`.
    Processed {
        pdf_name: String,
        json_name: String,
        headings: usize,
    },
    /// `pdf_name` was skipped because it could not be read or written.
    Failed { pdf_name: String, error: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    /// Set when processing stopped before every file was handled.
    pub cancelled: bool,
}

/// Processes every PDF of an input directory into JSON outlines.
pub struct BatchProcessor {
    backend: Box<dyn LayoutBackend>,
    extractor: OutlineExtractor,
    markdown: bool,
}

impl BatchProcessor {
    pub fn new(backend: Box<dyn LayoutBackend>, extractor: OutlineExtractor) -> Self {
        Self {
            backend,
            extractor,
            markdown: false,
        }
    }

    /// Also write a `<stem>_outline.md` per PDF.
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// Outline for a single PDF on disk.
    ///
    /// The outer error is a failure to read the file. The inner one is a
    /// document the backend could not parse.
    pub fn outline_for(
        &self,
        pdf: &Path,
    ) -> Result<Result<Outline, ParsingError>, IngestError> {
        let bytes = std::fs::read(pdf)?;
        let file_name = display_name(pdf);
        Ok(self
            .extractor
            .try_extract_from_bytes(&bytes, &file_name, self.backend.as_ref()))
    }

    /// Process all PDFs directly in `input_dir`, writing outlines into
    /// `output_dir` (created if missing).
    ///
    /// `is_cancelled` is polled before each file. Per-file failures are
    /// reported through `on_event` and do not stop the batch.
    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        on_event: &mut dyn FnMut(BatchEvent),
        is_cancelled: &dyn Fn() -> bool,
    ) -> Result<BatchSummary, IngestError> {
        std::fs::create_dir_all(output_dir)?;

        let pdfs = match find_pdfs(input_dir) {
            Ok(pdfs) => pdfs,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let mut summary = BatchSummary::default();
        if pdfs.is_empty() {
            on_event(BatchEvent::NoPdfs);
            return Ok(summary);
        }

        for pdf in &pdfs {
            if is_cancelled() {
                let remaining = pdfs.len() - summary.processed - summary.failed;
                tracing::info!(remaining, "batch cancelled");
                summary.cancelled = true;
                break;
            }

            let pdf_name = display_name(pdf);
            match self.process_file(pdf, output_dir, on_event) {
                Ok((json_path, headings)) => {
                    summary.processed += 1;
                    on_event(BatchEvent::Processed {
                        pdf_name,
                        json_name: display_name(&json_path),
                        headings,
                    });
                }
                Err(e) => {
                    tracing::warn!(file = %pdf.display(), error = %e, "failed to process PDF");
                    summary.failed += 1;
                    on_event(BatchEvent::Failed {
                        pdf_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            processed = summary.processed,
            failed = summary.failed,
            "batch complete"
        );
        Ok(summary)
    }

    fn process_file(
        &self,
        pdf: &Path,
        output_dir: &Path,
        on_event: &mut dyn FnMut(BatchEvent),
    ) -> Result<(PathBuf, usize), IngestError> {
        let outline = match self.outline_for(pdf)? {
            Ok(outline) => outline,
            Err(e) => {
                let pdf_name = display_name(pdf);
                tracing::warn!(
                    file = %pdf.display(),
                    error = %e,
                    "extraction failed, writing empty outline"
                );
                on_event(BatchEvent::ExtractionFailed {
                    pdf_name: pdf_name.clone(),
                    error: e.to_string(),
                });
                Outline::empty(pdf_name)
            }
        };

        let json_path = output_path(output_dir, pdf);
        let json = serde_json::to_string_pretty(&outline)?;
        std::fs::write(&json_path, json)?;

        if self.markdown {
            let md = format!("# {}\n\n{}\n", outline.title, render_markdown(&outline));
            std::fs::write(markdown_path(output_dir, pdf), md)?;
        }

        tracing::debug!(file = %pdf.display(), headings = outline.outline.len(), "outline written");
        Ok((json_path, outline.outline.len()))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
