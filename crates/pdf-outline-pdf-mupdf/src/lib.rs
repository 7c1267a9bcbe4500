use mupdf::{Document, TextPageFlags};

use pdf_outline_core::{BackendError, LayoutBackend, PageLayout, TextBox};

/// MuPDF-based implementation of [`LayoutBackend`].
///
/// This crate is the only one linking mupdf (AGPL-3.0); detection code in
/// `pdf-outline-parsing` never depends on it.
///
/// Each MuPDF text block becomes one [`TextBox`]. Block coordinates are
/// flipped from MuPDF's top-down device space to PDF's bottom-up user space
/// so that a larger `y0` means higher on the page.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutBackend for MupdfBackend {
    fn extract_layout(
        &self,
        bytes: &[u8],
        max_pages: usize,
    ) -> Result<Vec<PageLayout>, BackendError> {
        let document = Document::from_bytes(bytes, "application/pdf")
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages = Vec::new();

        for (index, page_result) in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
            .take(max_pages)
            .enumerate()
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let page_bounds = page
                .bounds()
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let page_height = page_bounds.y1 - page_bounds.y0;

            let mut boxes = Vec::new();
            for block in text_page.blocks() {
                let mut lines = Vec::new();
                let mut sizes = Vec::new();
                for line in block.lines() {
                    let mut line_text = String::new();
                    for c in line.chars() {
                        line_text.push(c.char().unwrap_or('\u{FFFD}'));
                        sizes.push(c.size());
                    }
                    lines.push(line_text);
                }

                // Image blocks carry no lines
                if lines.is_empty() {
                    continue;
                }

                let font_size = if sizes.is_empty() {
                    0.0
                } else {
                    sizes.iter().sum::<f32>() / sizes.len() as f32
                };
                let bounds = block.bounds();
                boxes.push(TextBox {
                    text: lines.join("\n").trim().to_string(),
                    font_size,
                    y0: page_height - (bounds.y1 - page_bounds.y0),
                });
            }

            tracing::debug!(page = index + 1, boxes = boxes.len(), "page layout extracted");
            pages.push(PageLayout {
                number: index + 1,
                boxes,
            });
        }

        Ok(pages)
    }
}
