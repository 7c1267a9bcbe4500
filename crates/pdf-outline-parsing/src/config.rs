use pdf_outline_core::HeadingLevel;
use pdf_outline_core::config_file::DetectionConfig;
use thiserror::Error;

/// Headings that are never reported, compared against lowercased text.
pub const DEFAULT_EXCLUDED_HEADINGS: &[&str] = &["figure", "table", "appendix"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidSize { name: &'static str, value: f32 },
    #[error("heading thresholds must satisfy H1 >= H2 >= H3 >= H4 (got {0:?})")]
    UnorderedThresholds([f32; 4]),
    #[error("max_pages must be at least 1")]
    ZeroPages,
}

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Minimum average font size for each heading level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontThresholds {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
    pub h4: f32,
}

impl Default for FontThresholds {
    fn default() -> Self {
        Self {
            h1: 16.0,
            h2: 14.0,
            h3: 12.0,
            h4: 10.0,
        }
    }
}

impl FontThresholds {
    pub fn for_level(&self, level: HeadingLevel) -> f32 {
        match level {
            HeadingLevel::H1 => self.h1,
            HeadingLevel::H2 => self.h2,
            HeadingLevel::H3 => self.h3,
            HeadingLevel::H4 => self.h4,
        }
    }
}

/// Configuration for title and heading detection.
///
/// Use [`OutlineConfigBuilder`] to construct a validated non-default config.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    pub(crate) thresholds: FontThresholds,
    /// Pages past this count are never inspected (default: 50).
    pub(crate) max_pages: usize,
    /// Maximum vertical gap between boxes merged into one group (default: 8).
    pub(crate) y_threshold: f32,
    /// Minimum character count of a heading or title (default: 4).
    pub(crate) min_text_length: usize,
    /// Lowercased heading texts that are dropped.
    pub(crate) excluded_headings: Vec<String>,
    /// Boxes at or below this size are ignored; titles need at least this size (default: 9).
    pub(crate) title_min_font_size: f32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            thresholds: FontThresholds::default(),
            max_pages: 50,
            y_threshold: 8.0,
            min_text_length: 4,
            excluded_headings: DEFAULT_EXCLUDED_HEADINGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            title_min_font_size: 9.0,
        }
    }
}

impl OutlineConfig {
    pub fn thresholds(&self) -> FontThresholds {
        self.thresholds
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn y_threshold(&self) -> f32 {
        self.y_threshold
    }

    pub fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    pub fn title_min_font_size(&self) -> f32 {
        self.title_min_font_size
    }

    pub fn is_excluded(&self, lowered: &str) -> bool {
        self.excluded_headings.iter().any(|h| h == lowered)
    }
}

/// Builder for [`OutlineConfig`].
///
/// Unset fields fall back to the defaults. [`build()`](Self::build) rejects
/// negative sizes, unordered heading thresholds and a zero page limit.
#[derive(Debug, Clone, Default)]
pub struct OutlineConfigBuilder {
    h1_size: Option<f32>,
    h2_size: Option<f32>,
    h3_size: Option<f32>,
    h4_size: Option<f32>,
    max_pages: Option<usize>,
    y_threshold: Option<f32>,
    min_text_length: Option<usize>,
    title_min_font_size: Option<f32>,
    excluded_headings: ListOverride<String>,
}

impl OutlineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from the `[detection]` table of a config file.
    pub fn from_detection(detection: &DetectionConfig) -> Self {
        let mut builder = Self {
            h1_size: detection.h1_size,
            h2_size: detection.h2_size,
            h3_size: detection.h3_size,
            h4_size: detection.h4_size,
            max_pages: detection.max_pages,
            y_threshold: detection.y_threshold,
            min_text_length: detection.min_text_length,
            title_min_font_size: detection.title_min_font_size,
            ..Self::default()
        };
        if let Some(ref excluded) = detection.excluded_headings {
            builder = builder.excluded_headings(excluded.clone());
        }
        builder
    }

    pub fn heading_size(mut self, level: HeadingLevel, size: f32) -> Self {
        match level {
            HeadingLevel::H1 => self.h1_size = Some(size),
            HeadingLevel::H2 => self.h2_size = Some(size),
            HeadingLevel::H3 => self.h3_size = Some(size),
            HeadingLevel::H4 => self.h4_size = Some(size),
        }
        self
    }

    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }

    pub fn y_threshold(mut self, threshold: f32) -> Self {
        self.y_threshold = Some(threshold);
        self
    }

    pub fn min_text_length(mut self, len: usize) -> Self {
        self.min_text_length = Some(len);
        self
    }

    pub fn title_min_font_size(mut self, size: f32) -> Self {
        self.title_min_font_size = Some(size);
        self
    }

    /// Replace the excluded heading list.
    pub fn excluded_headings(mut self, headings: Vec<String>) -> Self {
        self.excluded_headings = ListOverride::Replace(headings);
        self
    }

    /// Add to the default excluded heading list.
    pub fn add_excluded_headings(mut self, headings: Vec<String>) -> Self {
        self.excluded_headings = ListOverride::Extend(headings);
        self
    }

    pub fn build(self) -> Result<OutlineConfig, ConfigError> {
        let defaults = OutlineConfig::default();

        let thresholds = FontThresholds {
            h1: checked("h1_size", self.h1_size.unwrap_or(defaults.thresholds.h1))?,
            h2: checked("h2_size", self.h2_size.unwrap_or(defaults.thresholds.h2))?,
            h3: checked("h3_size", self.h3_size.unwrap_or(defaults.thresholds.h3))?,
            h4: checked("h4_size", self.h4_size.unwrap_or(defaults.thresholds.h4))?,
        };
        if !(thresholds.h1 >= thresholds.h2
            && thresholds.h2 >= thresholds.h3
            && thresholds.h3 >= thresholds.h4)
        {
            return Err(ConfigError::UnorderedThresholds([
                thresholds.h1,
                thresholds.h2,
                thresholds.h3,
                thresholds.h4,
            ]));
        }

        let max_pages = self.max_pages.unwrap_or(defaults.max_pages);
        if max_pages == 0 {
            return Err(ConfigError::ZeroPages);
        }

        let default_excluded: Vec<String> = defaults.excluded_headings;
        let excluded_headings = self
            .excluded_headings
            .resolve(&default_excluded)
            .into_iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        Ok(OutlineConfig {
            thresholds,
            max_pages,
            y_threshold: checked(
                "y_threshold",
                self.y_threshold.unwrap_or(defaults.y_threshold),
            )?,
            min_text_length: self.min_text_length.unwrap_or(defaults.min_text_length),
            excluded_headings,
            title_min_font_size: checked(
                "title_min_font_size",
                self.title_min_font_size
                    .unwrap_or(defaults.title_min_font_size),
            )?,
        })
    }
}

fn checked(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidSize { name, value })
    }
}
