//! Module discovery and catalog assembly.
//!
//! Walks the modules directory to discover modules and their thumbnails,
//! producing a [`Catalog`] that the table renderer and the montage both consume.
//!
//! ## Directory Structure
//!
//! ```text
//! modules/                          # Modules root
//! ├── alpha/                        # Module id = directory name
//! │   ├── metadata.yaml             # Required for the directory to count as a module
//! │   └── assets/
//! │       ├── 01_thumbnail.png      # "thumbnail" anywhere in the name, any case
//! │       ├── 02_Thumbnail.jpg
//! │       └── diagram.png           # Ignored
//! ├── beta/
//! │   └── metadata.yaml             # No assets/ → zero thumbnails
//! └── scratch/                      # No metadata.yaml → not a module
//! ```
//!
//! ## Ordering
//!
//! Modules are sorted by directory name and thumbnails by file name, both in
//! byte order. Listing order on disk never leaks into the output, so repeated
//! runs are reproducible.

use crate::metadata::{self, METADATA_FILE, ModuleRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Asset subdirectory inside each module.
pub const ASSETS_DIR: &str = "assets";

/// Case-insensitive substring that marks an asset as a thumbnail.
const THUMBNAIL_KEYWORD: &str = "thumbnail";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Modules directory not found: {0}")]
    MissingModulesDir(PathBuf),
}

/// One module: its resolved metadata and every discovered thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleEntry {
    pub record: ModuleRecord,
    /// All thumbnails in file-name order, uncapped.
    pub thumbnails: Vec<PathBuf>,
}

impl ModuleEntry {
    /// The first `limit` thumbnails, as shown inline in the table.
    pub fn table_thumbnails(&self, limit: usize) -> &[PathBuf] {
        &self.thumbnails[..self.thumbnails.len().min(limit)]
    }
}

/// Every module under the modules root, in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub modules: Vec<ModuleEntry>,
}

impl Catalog {
    /// All thumbnails of all modules flattened in catalog order.
    ///
    /// This is the montage's input; no per-module cap applies.
    pub fn montage_sources(&self) -> Vec<&Path> {
        self.modules
            .iter()
            .flat_map(|m| m.thumbnails.iter().map(PathBuf::as_path))
            .collect()
    }

    pub fn thumbnail_count(&self) -> usize {
        self.modules.iter().map(|m| m.thumbnails.len()).sum()
    }
}

/// Scan `modules_dir` into a catalog.
pub fn collect(modules_dir: &Path) -> Result<Catalog, ScanError> {
    let ids = list_modules(modules_dir)?;
    let mut modules = Vec::with_capacity(ids.len());
    for id in ids {
        let module_dir = modules_dir.join(&id);
        let record = metadata::load_metadata(&module_dir, &id);
        let thumbnails = list_thumbnails(&module_dir, None)?;
        modules.push(ModuleEntry { record, thumbnails });
    }
    Ok(Catalog { modules })
}

/// List module ids: subdirectories holding a `metadata.yaml`, sorted.
pub fn list_modules(modules_dir: &Path) -> Result<Vec<String>, ScanError> {
    if !modules_dir.is_dir() {
        return Err(ScanError::MissingModulesDir(modules_dir.to_path_buf()));
    }

    let mut ids = Vec::new();
    for entry in WalkDir::new(modules_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || !entry.file_type().is_dir() {
            continue;
        }
        if !entry.path().join(METADATA_FILE).is_file() {
            tracing::debug!(dir = %entry.path().display(), "no {METADATA_FILE}, skipping");
            continue;
        }
        ids.push(name.into_owned());
    }
    Ok(ids)
}

/// List thumbnail files in `<module_dir>/assets`, sorted by file name.
///
/// A missing assets directory yields an empty list. `limit` truncates the
/// sorted list.
pub fn list_thumbnails(module_dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>, ScanError> {
    let assets = module_dir.join(ASSETS_DIR);
    if !assets.is_dir() {
        return Ok(Vec::new());
    }

    let mut thumbnails = Vec::new();
    for entry in WalkDir::new(&assets)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        if limit.is_some_and(|l| thumbnails.len() >= l) {
            break;
        }
        let entry = entry?;
        if entry.file_type().is_file() && is_thumbnail_name(&entry.file_name().to_string_lossy()) {
            thumbnails.push(entry.into_path());
        }
    }
    Ok(thumbnails)
}

fn is_thumbnail_name(name: &str) -> bool {
    name.to_ascii_lowercase().contains(THUMBNAIL_KEYWORD)
}
