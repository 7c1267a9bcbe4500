use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub detection: Option<DetectionConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub h1_size: Option<f32>,
    pub h2_size: Option<f32>,
    pub h3_size: Option<f32>,
    pub h4_size: Option<f32>,
    pub max_pages: Option<usize>,
    pub y_threshold: Option<f32>,
    pub min_text_length: Option<usize>,
    pub title_min_font_size: Option<f32>,
    /// Replaces the built-in excluded heading list when set.
    pub excluded_headings: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Also write a `<stem>_outline.md` next to each JSON outline.
    pub markdown: Option<bool>,
}

/// Platform config directory path: `<config_dir>/pdf-outline/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdf-outline").join("config.toml"))
}

/// Load config by cascading CWD `.pdf-outline.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdf-outline.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

fn pick<S, T>(
    overlay: &Option<S>,
    base: &Option<S>,
    field: impl Fn(&S) -> Option<T>,
) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&field)
        .or_else(|| base.as_ref().and_then(&field))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        paths: Some(PathsConfig {
            input_dir: pick(&overlay.paths, &base.paths, |p| p.input_dir.clone()),
            output_dir: pick(&overlay.paths, &base.paths, |p| p.output_dir.clone()),
        }),
        detection: Some(DetectionConfig {
            h1_size: pick(&overlay.detection, &base.detection, |d| d.h1_size),
            h2_size: pick(&overlay.detection, &base.detection, |d| d.h2_size),
            h3_size: pick(&overlay.detection, &base.detection, |d| d.h3_size),
            h4_size: pick(&overlay.detection, &base.detection, |d| d.h4_size),
            max_pages: pick(&overlay.detection, &base.detection, |d| d.max_pages),
            y_threshold: pick(&overlay.detection, &base.detection, |d| d.y_threshold),
            min_text_length: pick(&overlay.detection, &base.detection, |d| {
                d.min_text_length
            }),
            title_min_font_size: pick(&overlay.detection, &base.detection, |d| {
                d.title_min_font_size
            }),
            excluded_headings: pick(&overlay.detection, &base.detection, |d| {
                d.excluded_headings.clone()
            }),
        }),
        output: Some(OutputConfig {
            markdown: pick(&overlay.output, &base.output, |o| o.markdown),
        }),
    }
}
