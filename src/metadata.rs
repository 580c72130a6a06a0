//! Module metadata loading and default resolution.
//!
//! Each module directory carries a `metadata.yaml` describing it:
//!
//! ```yaml
//! name: Depth Estimator
//! description: Monocular depth estimation
//! license: MIT
//! tag: [vision, depth]
//! note: Requires a GPU
//! source:
//!   publication: [https://arxiv.org/abs/0000.00000]
//!   git_repository: [https://github.com/example/depth]
//!   data_repository: []
//! ```
//!
//! Every field is optional. Parsing goes through [`RawMetadata`], which mirrors
//! the file exactly with `Option`s, and is then resolved into a
//! [`ModuleRecord`] where every field holds a concrete value:
//!
//! | Field | Default |
//! |---|---|
//! | `name` | the module directory name |
//! | `description` | [`DEFAULT_DESCRIPTION`] |
//! | `license` | [`DEFAULT_LICENSE`] |
//! | `note` | [`NONE_PLACEHOLDER`] |
//! | `tag` | `[NONE_PLACEHOLDER]` |
//! | `source.*` | empty list |
//!
//! A malformed file is not fatal: it is logged and the module is rendered with
//! all defaults.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Metadata file name inside each module directory.
pub const METADATA_FILE: &str = "metadata.yaml";

pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DEFAULT_LICENSE: &str = "Unknown";
/// Placeholder for absent notes, tags and empty link lists.
pub const NONE_PLACEHOLDER: &str = "None";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// `metadata.yaml` as written, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub tag: Option<Vec<String>>,
    pub note: Option<String>,
    pub source: Option<RawSources>,
}

/// The `source:` block of `metadata.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSources {
    pub publication: Vec<String>,
    pub git_repository: Vec<String>,
    pub data_repository: Vec<String>,
}

/// A module's metadata with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRecord {
    /// Directory name under the modules root; stable sort key and link target.
    pub id: String,
    pub name: String,
    pub description: String,
    pub publications: Vec<String>,
    pub git_repositories: Vec<String>,
    pub data_repositories: Vec<String>,
    pub license: String,
    pub tags: Vec<String>,
    pub note: String,
}

impl ModuleRecord {
    /// Resolve a raw record, substituting defaults for missing fields.
    pub fn from_raw(id: &str, raw: RawMetadata) -> Self {
        let sources = raw.source.unwrap_or_default();
        Self {
            id: id.to_string(),
            name: raw.name.unwrap_or_else(|| id.to_string()),
            description: raw
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            publications: sources.publication,
            git_repositories: sources.git_repository,
            data_repositories: sources.data_repository,
            license: raw.license.unwrap_or_else(|| DEFAULT_LICENSE.to_string()),
            tags: raw
                .tag
                .unwrap_or_else(|| vec![NONE_PLACEHOLDER.to_string()]),
            note: raw.note.unwrap_or_else(|| NONE_PLACEHOLDER.to_string()),
        }
    }

    /// A record consisting only of defaults.
    pub fn defaults(id: &str) -> Self {
        Self::from_raw(id, RawMetadata::default())
    }
}

/// Parse `metadata.yaml` text. An empty document is an empty record.
pub fn parse_metadata(text: &str) -> Result<RawMetadata, MetadataError> {
    if text.trim().is_empty() {
        return Ok(RawMetadata::default());
    }
    let raw: Option<RawMetadata> = serde_yaml::from_str(text)?;
    Ok(raw.unwrap_or_default())
}

/// Read and parse a metadata file.
pub fn read_metadata(path: &Path) -> Result<RawMetadata, MetadataError> {
    let text = std::fs::read_to_string(path)?;
    parse_metadata(&text)
}

/// Load the record for module `id` living in `module_dir`.
///
/// Never fails: read or parse errors are logged and the defaults are used.
pub fn load_metadata(module_dir: &Path, id: &str) -> ModuleRecord {
    let path = module_dir.join(METADATA_FILE);
    match read_metadata(&path) {
        Ok(raw) => ModuleRecord::from_raw(id, raw),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable metadata, using defaults");
            ModuleRecord::defaults(id)
        }
    }
}
