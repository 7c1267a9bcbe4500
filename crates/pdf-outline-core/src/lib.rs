use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;

pub use backend::{BackendError, LayoutBackend};

/// A single text container on a page, as reported by a layout backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// Box text with surrounding whitespace trimmed.
    pub text: String,
    /// Mean glyph size of the box, `0.0` if it has no glyphs.
    pub font_size: f32,
    /// Bottom edge in PDF user space (y grows upward).
    pub y0: f32,
}

impl TextBox {
    pub fn new(text: impl Into<String>, font_size: f32, y0: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            y0,
        }
    }
}

/// Text boxes of one page.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// 1-based page number.
    pub number: usize,
    pub boxes: Vec<TextBox>,
}

/// Heading depth, serialized as `"H1"`..`"H4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    /// Nesting depth, 1 for `H1`.
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// 1-based page number.
    pub page: usize,
}

/// Title plus headings of a document, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl Outline {
    /// Outline used when a document could not be read at all.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_serializes_in_field_order() {
        let outline = Outline {
            title: "Über Test".into(),
            outline: vec![OutlineEntry {
                level: HeadingLevel::H2,
                text: "Introduction".into(),
                page: 3,
            }],
        };
        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Über Test","outline":[{"level":"H2","text":"Introduction","page":3}]}"#
        );
    }

    #[test]
    fn heading_depths() {
        let depths: Vec<usize> = HeadingLevel::ALL.iter().map(|l| l.depth()).collect();
        assert_eq!(depths, vec![1, 2, 3, 4]);
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
    }
}
