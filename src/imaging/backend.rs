//! Image codec trait and shared types.
//!
//! The [`ImageBackend`] trait is the boundary between the pure layout engine
//! and the filesystem: it decodes thumbnails into rasters and encodes the
//! finished montage. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::Quality;
use image::{DynamicImage, RgbImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image codecs.
pub trait ImageBackend {
    /// Decode the image at `path` at its native size.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    fn encode(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError>;
}
