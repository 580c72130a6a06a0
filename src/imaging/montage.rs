//! Montage composition.
//!
//! Takes already-decoded rasters and tiles them onto a fixed-size square
//! canvas according to a [`LayoutPlan`]. No I/O happens here; decoding and
//! saving are the caller's job (see [`operations`](super::operations)).
//!
//! Each source goes through the same steps:
//!
//! 1. Shrink to fit the cell (Lanczos3), never enlarging.
//! 2. Alpha-composite, centered, onto a background-filled cell.
//! 3. Copy the cell onto the canvas at its grid origin.

use super::calculations::{LayoutError, LayoutPlan, PlacedThumbnail};
use crate::config::MontageSettings;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbImage, RgbaImage};

/// A composed montage and the plan that produced it.
#[derive(Debug, Clone)]
pub struct Montage {
    pub image: RgbImage,
    pub plan: LayoutPlan,
}

/// Compose `images`, in order, into one `size × size` montage.
///
/// Returns `Ok(None)` when `images` is empty.
#[tracing::instrument(skip_all, fields(count = images.len(), size = settings.size))]
pub fn compose(
    images: &[DynamicImage],
    settings: &MontageSettings,
) -> Result<Option<Montage>, LayoutError> {
    let Some(plan) = LayoutPlan::compute(images.len(), settings)? else {
        return Ok(None);
    };
    tracing::debug!(?plan, "montage layout");

    let [r, g, b] = settings.background;
    let background = Rgba([r, g, b, u8::MAX]);
    let mut canvas = RgbaImage::from_pixel(settings.size, settings.size, background);

    for (index, source) in images.iter().enumerate() {
        let placed = plan.place(index, source.dimensions());
        let cell = render_cell(source, &placed, plan.cell_size, background);
        imageops::replace(
            &mut canvas,
            &cell,
            i64::from(placed.origin.0),
            i64::from(placed.origin.1),
        );
    }

    Ok(Some(Montage {
        image: DynamicImage::ImageRgba8(canvas).into_rgb8(),
        plan,
    }))
}

/// Build one opaque `cell × cell` tile with the resized source centered in it.
fn render_cell(
    source: &DynamicImage,
    placed: &PlacedThumbnail,
    cell_size: u32,
    background: Rgba<u8>,
) -> RgbaImage {
    let rgba = source.to_rgba8();
    let resized = if rgba.dimensions() == (placed.width, placed.height) {
        rgba
    } else {
        imageops::resize(&rgba, placed.width, placed.height, FilterType::Lanczos3)
    };

    let mut cell = RgbaImage::from_pixel(cell_size, cell_size, background);
    imageops::overlay(
        &mut cell,
        &resized,
        i64::from(placed.offset.0),
        i64::from(placed.offset.1),
    );
    cell
}
