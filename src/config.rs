//! Index configuration module.
//!
//! Handles loading and validating `index.toml`. Stock defaults are
//! overridden by an optional `index.toml` in the project root; the result is an
//! immutable [`IndexConfig`] built once at startup and passed by reference to
//! every stage.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! modules_dir = "modules"                     # One subdirectory per module
//! readme = "README.md"                        # Host document to patch
//! montage = "assets/thumbnail_montage.jpg"    # Montage output (jpg/jpeg/png)
//!
//! [table]
//! marker = "<!-- AUTO-GENERATED-TABLE -->"    # Everything after this is regenerated
//! max_thumbnails = 3                          # Inline thumbnails per table row
//!
//! [montage]
//! enabled = true
//! size = 500                                  # Canvas side length in pixels
//! thumbnail_max_size = 100                    # Largest allowed cell side
//! padding = 5                                 # Gap between and around cells
//! background = [255, 255, 255]                # RGB fill
//! quality = 90                                # JPEG quality (1-100)
//! ```
//!
//! ## Partial Configuration
//!
//! The file is sparse; override just the values you want:
//!
//! ```toml
//! [montage]
//! size = 800
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "index.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Index configuration loaded from `index.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Input and output locations, relative to the project root.
    pub paths: PathsConfig,
    /// Markdown table settings.
    pub table: TableConfig,
    /// Montage canvas and layout settings.
    pub montage: MontageSettings,
}

impl IndexConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.modules_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.modules_dir must not be empty".into(),
            ));
        }
        if self.paths.readme.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.readme must not be empty".into(),
            ));
        }
        let readme = Path::new(&self.paths.readme);
        if readme.is_absolute()
            || readme
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ConfigError::Validation(
                "paths.readme must be relative to the project root without '..'".into(),
            ));
        }
        if self.paths.montage.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.montage must not be empty".into(),
            ));
        }
        if self.table.marker.is_empty() {
            return Err(ConfigError::Validation(
                "table.marker must not be empty".into(),
            ));
        }
        if self.montage.size == 0 {
            return Err(ConfigError::Validation(
                "montage.size must be greater than 0".into(),
            ));
        }
        if self.montage.thumbnail_max_size == 0 {
            return Err(ConfigError::Validation(
                "montage.thumbnail_max_size must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.montage.quality) {
            return Err(ConfigError::Validation(
                "montage.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding one subdirectory per module.
    pub modules_dir: String,
    /// Markdown document patched in place.
    pub readme: String,
    /// Montage image output; the extension picks the encoder.
    pub montage: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            modules_dir: "modules".to_string(),
            readme: "README.md".to_string(),
            montage: "assets/thumbnail_montage.jpg".to_string(),
        }
    }
}

/// Markdown table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Sentinel after which the document is regenerated.
    pub marker: String,
    /// Maximum inline thumbnails per module row.
    pub max_thumbnails: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            marker: "<!-- AUTO-GENERATED-TABLE -->".to_string(),
            max_thumbnails: 3,
        }
    }
}

/// Montage canvas and layout settings.
///
/// `size`, `thumbnail_max_size` and `padding` are the three layout constants
/// consumed by [`LayoutPlan`](crate::imaging::LayoutPlan).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MontageSettings {
    /// Set to false to only regenerate the table.
    pub enabled: bool,
    /// Side length of the square canvas.
    pub size: u32,
    /// Upper bound on a cell's side length.
    pub thumbnail_max_size: u32,
    /// Pixels between cells and around the grid (multi-image layouts only).
    pub padding: u32,
    /// Canvas and cell background as RGB.
    pub background: [u8; 3],
    /// JPEG encoding quality; ignored for PNG output.
    pub quality: u8,
}

impl Default for MontageSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 500,
            thumbnail_max_size: 100,
            padding: 5,
            background: [255, 255, 255],
            quality: 90,
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse `index.toml` text and validate it.
///
/// Missing sections and keys take their defaults through `#[serde(default)]`.
pub fn parse_config(text: &str) -> Result<IndexConfig, ConfigError> {
    let config: IndexConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load `index.toml` from the project root, or the defaults when it is absent.
pub fn load_config(root: &Path) -> Result<IndexConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(IndexConfig::default());
    }
    parse_config(&fs::read_to_string(&config_path)?)
}

/// Returns a fully-commented stock `index.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# module-index configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# One subdirectory per module, each with a metadata.yaml and an assets/ folder.
modules_dir = "modules"

# Markdown document that receives the generated table.
readme = "README.md"

# Montage output. The extension selects the encoder: jpg, jpeg or png.
montage = "assets/thumbnail_montage.jpg"

# ---------------------------------------------------------------------------
# Table
# ---------------------------------------------------------------------------
[table]
# Everything after this marker is replaced on every run.
marker = "<!-- AUTO-GENERATED-TABLE -->"

# Inline thumbnails shown per module row.
max_thumbnails = 3

# ---------------------------------------------------------------------------
# Montage
# ---------------------------------------------------------------------------
[montage]
# Set to false to skip the montage and only regenerate the table.
enabled = true

# Side length of the square canvas in pixels.
size = 500

# Largest side a single thumbnail cell may have.
thumbnail_max_size = 100

# Gap between cells and around the grid. Not applied to single-image montages.
padding = 5

# Background fill as [r, g, b].
background = [255, 255, 255]

# JPEG quality (1-100). Ignored for PNG output.
quality = 90
"##
}
