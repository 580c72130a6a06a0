//! High-level image operations.
//!
//! These functions combine the pure montage engine with backend execution:
//! decode every source, compose, then hand the canvas to the backend to save.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{LayoutError, LayoutPlan};
use super::montage::compose;
use super::params::Quality;
use crate::config::MontageSettings;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MontageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image codec failed: {0}")]
    Backend(#[from] BackendError),
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),
}

/// A montage that was written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct MontageSummary {
    pub path: PathBuf,
    pub images: usize,
    pub plan: LayoutPlan,
}

/// Build the montage for `sources` and write it to `output`.
///
/// Every source is decoded before anything is composed; a single decode
/// failure aborts the montage so a partial grid is never written. With no
/// sources, nothing is decoded or written and `Ok(None)` is returned.
pub fn create_montage(
    backend: &impl ImageBackend,
    sources: &[&Path],
    settings: &MontageSettings,
    output: &Path,
) -> Result<Option<MontageSummary>, MontageError> {
    if sources.is_empty() {
        return Ok(None);
    }

    let images = sources
        .iter()
        .map(|path| backend.decode(path))
        .collect::<Result<Vec<_>, _>>()?;

    let Some(montage) = compose(&images, settings)? else {
        return Ok(None);
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    backend.encode(&montage.image, output, Quality::new(settings.quality))?;

    Ok(Some(MontageSummary {
        path: output.to_path_buf(),
        images: images.len(),
        plan: montage.plan,
    }))
}
