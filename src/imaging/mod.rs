//! Thumbnail montage imaging in pure Rust, no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, TIFF, WebP) |
//! | **Shrink to fit** | `image::imageops::resize` with Lanczos3 |
//! | **Tile** | `image::imageops::overlay` / `replace` |
//! | **Encode** | JPEG (quality-controlled) or PNG, by extension |
//!
//! The module is split into:
//! - **Calculations**: Pure layout math for the grid (unit testable)
//! - **Montage**: Composition of decoded rasters onto the canvas, no I/O
//! - **Parameters**: Encoding parameters
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Decode → compose → encode

pub mod backend;
mod calculations;
pub mod montage;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{
    LayoutError, LayoutPlan, PlacedThumbnail, center_offset, column_count, shrink_to_fit,
};
pub use montage::{Montage, compose};
pub use operations::{MontageError, MontageSummary, create_montage};
pub use params::Quality;
pub use rust_backend::RustBackend;
