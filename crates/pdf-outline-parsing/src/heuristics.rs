use once_cell::sync::Lazy;
use pdf_outline_core::{HeadingLevel, TextBox};
use regex::Regex;

use crate::config::OutlineConfig;

/// Text made only of digits, whitespace, dashes, dots, parens and colons
/// ("3.1", "(12)", "1 – 4"). Page numbers and bare section labels.
static NUMERIC_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-–.():]+$").unwrap());

/// Mean of the given glyph sizes, `0.0` when there are none.
pub fn average_font_size(sizes: &[f32]) -> f32 {
    if sizes.is_empty() {
        return 0.0;
    }
    sizes.iter().sum::<f32>() / sizes.len() as f32
}

/// Mean font size of a group of boxes.
pub fn group_font_size(group: &[TextBox]) -> f32 {
    let sizes: Vec<f32> = group.iter().map(|b| b.font_size).collect();
    average_font_size(&sizes)
}

pub fn is_numeric_label(text: &str) -> bool {
    NUMERIC_LABEL_RE.is_match(text)
}

/// Whether `text` rendered at `avg_size` qualifies as a section heading.
pub fn is_heading(text: &str, avg_size: f32, config: &OutlineConfig) -> bool {
    let lowered = text.trim().to_lowercase();
    lowered.chars().count() >= config.min_text_length
        && avg_size >= config.thresholds.h3
        && !is_numeric_label(&lowered)
        && !config.is_excluded(&lowered)
}

/// Whether `text` rendered at `avg_size` can be the document title.
pub fn is_potential_title(text: &str, avg_size: f32, config: &OutlineConfig) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() >= config.min_text_length
        && avg_size >= config.title_min_font_size
        && !is_numeric_label(trimmed)
}

/// First level, from H1 down, whose threshold `avg_size` reaches.
pub fn heading_level(avg_size: f32, config: &OutlineConfig) -> Option<HeadingLevel> {
    HeadingLevel::ALL
        .into_iter()
        .find(|&level| avg_size >= config.thresholds.for_level(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_font_size(&[]), 0.0);
        assert_eq!(average_font_size(&[10.0, 14.0]), 12.0);
    }

    #[test]
    fn numeric_labels() {
        assert!(is_numeric_label("3.1"));
        assert!(is_numeric_label("(12)"));
        assert!(is_numeric_label("1 – 4"));
        assert!(is_numeric_label("2:"));
        assert!(!is_numeric_label("3.1 Results"));
        assert!(!is_numeric_label(""));
    }

    #[test]
    fn heading_requires_h3_size() {
        let config = OutlineConfig::default();
        assert!(is_heading("Introduction", 12.0, &config));
        assert!(!is_heading("Introduction", 11.9, &config));
    }

    #[test]
    fn heading_rejects_short_numeric_and_excluded() {
        let config = OutlineConfig::default();
        assert!(!is_heading("Abc", 20.0, &config));
        assert!(is_heading(" Abcd ", 20.0, &config));
        assert!(!is_heading("4.2.1", 20.0, &config));
        assert!(!is_heading("FIGURE", 20.0, &config));
        assert!(!is_heading("  Table ", 20.0, &config));
        assert!(is_heading("Table 3", 20.0, &config));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let config = OutlineConfig::default();
        // 3 chars, 6 bytes
        assert!(!is_heading("äöü", 20.0, &config));
        assert!(is_heading("äöüß", 20.0, &config));
    }

    #[test]
    fn potential_title_uses_title_threshold() {
        let config = OutlineConfig::default();
        assert!(is_potential_title("A Study", 9.0, &config));
        assert!(!is_potential_title("A Study", 8.9, &config));
        assert!(!is_potential_title("2024", 30.0, &config));
        // Excluded words may still be titles
        assert!(is_potential_title("Appendix", 20.0, &config));
    }

    #[test]
    fn levels_by_threshold() {
        let config = OutlineConfig::default();
        assert_eq!(heading_level(24.0, &config), Some(HeadingLevel::H1));
        assert_eq!(heading_level(16.0, &config), Some(HeadingLevel::H1));
        assert_eq!(heading_level(15.9, &config), Some(HeadingLevel::H2));
        assert_eq!(heading_level(12.0, &config), Some(HeadingLevel::H3));
        assert_eq!(heading_level(10.5, &config), Some(HeadingLevel::H4));
        assert_eq!(heading_level(9.99, &config), None);
    }
}
