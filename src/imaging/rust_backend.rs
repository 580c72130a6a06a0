//! Pure Rust codec backed by the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `ImageReader` with content sniffing |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless) |

use super::backend::{BackendError, ImageBackend};
use super::params::Quality;
use image::{DynamicImage, ImageEncoder, ImageReader, RgbImage};
use std::fs;
use std::path::Path;

/// Codec using the `image` crate's pure Rust decoders and encoders.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })
    }

    fn encode(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let write_failed = |e: image::ImageError| {
            BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
        };

        // Encode fully in memory so a failure never leaves a truncated file
        let mut buffer = Vec::new();
        match ext.as_str() {
            "jpg" | "jpeg" => {
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.value())
                    .write_image(
                        image.as_raw(),
                        image.width(),
                        image.height(),
                        image::ExtendedColorType::Rgb8,
                    )
                    .map_err(write_failed)?;
            }
            "png" => {
                image::codecs::png::PngEncoder::new(&mut buffer)
                    .write_image(
                        image.as_raw(),
                        image.width(),
                        image.height(),
                        image::ExtendedColorType::Rgb8,
                    )
                    .map_err(write_failed)?;
            }
            other => {
                return Err(BackendError::ProcessingFailed(format!(
                    "Unsupported output format: {}",
                    other
                )));
            }
        }

        fs::write(path, buffer)?;
        Ok(())
    }
}
