use pdf_outline_core::{LayoutBackend, Outline, OutlineEntry, PageLayout, TextBox};

use crate::ParsingError;
use crate::config::OutlineConfig;
use crate::grouping::group_boxes_by_y;
use crate::heuristics::{group_font_size, heading_level, is_heading, is_potential_title};
use crate::title::fallback_title;

/// Heading found on a page, with its position kept for ordering.
struct Candidate {
    entry: OutlineEntry,
    y0: f32,
}

/// Configurable title and heading detector.
///
/// Holds an [`OutlineConfig`] and runs the detection pipeline over pages
/// produced by a [`LayoutBackend`].
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    config: OutlineConfig,
}

impl OutlineExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OutlineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Detect the title and headings of already extracted pages.
    ///
    /// Pipeline:
    /// 1. Drop boxes at or below the title font size
    /// 2. Group the rest into rows by vertical proximity
    /// 3. The first row on page 1 that looks like a title becomes the title
    /// 4. Remaining rows large enough become H1–H4 headings
    /// 5. Headings are ordered by page, then top to bottom
    pub fn extract(&self, pages: &[PageLayout], file_name: &str) -> Outline {
        let config = &self.config;
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut title: Option<String> = None;

        for page in pages.iter().take(config.max_pages) {
            let boxes: Vec<TextBox> = page
                .boxes
                .iter()
                .filter(|b| b.font_size > config.title_min_font_size)
                .cloned()
                .collect();

            for group in group_boxes_by_y(&boxes, config.y_threshold) {
                let merged = group
                    .iter()
                    .map(|b| b.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                let avg_size = group_font_size(&group);

                if page.number == 1
                    && title.is_none()
                    && is_potential_title(&merged, avg_size, config)
                {
                    tracing::debug!(file = file_name, title = %merged, "title candidate");
                    title = Some(merged);
                    continue;
                }

                if !is_heading(&merged, avg_size, config) {
                    continue;
                }
                if let Some(level) = heading_level(avg_size, config) {
                    let y0 = group.iter().map(|b| b.y0).fold(f32::INFINITY, f32::min);
                    candidates.push(Candidate {
                        entry: OutlineEntry {
                            level,
                            text: merged,
                            page: page.number,
                        },
                        y0,
                    });
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.entry
                .page
                .cmp(&b.entry.page)
                .then_with(|| b.y0.total_cmp(&a.y0))
        });

        tracing::debug!(
            file = file_name,
            pages = pages.len(),
            headings = candidates.len(),
            "outline extracted"
        );

        Outline {
            title: title.unwrap_or_else(|| fallback_title(file_name)),
            outline: candidates.into_iter().map(|c| c.entry).collect(),
        }
    }

    /// Run `backend` over `bytes` and detect the outline, propagating
    /// backend failures.
    pub fn try_extract_from_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        backend: &dyn LayoutBackend,
    ) -> Result<Outline, ParsingError> {
        let pages = backend.extract_layout(bytes, self.config.max_pages)?;
        Ok(self.extract(&pages, file_name))
    }

    /// Like [`try_extract_from_bytes`](Self::try_extract_from_bytes), but a
    /// document that cannot be read yields an empty outline titled with the
    /// raw file name.
    pub fn extract_from_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        backend: &dyn LayoutBackend,
    ) -> Outline {
        match self.try_extract_from_bytes(bytes, file_name, backend) {
            Ok(outline) => outline,
            Err(e) => {
                tracing::warn!(file = file_name, error = %e, "extraction failed, writing empty outline");
                Outline::empty(file_name)
            }
        }
    }
}
