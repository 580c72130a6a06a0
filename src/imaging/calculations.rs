//! Pure layout calculations for the montage grid.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! ```text
//!  ┌──────────────────────────── size ────────────────────────────┐
//!  │ pad ┌─cell─┐ pad ┌─cell─┐ pad ...                            │
//!  │     │      │     │      │                                    │
//!  │     └──────┘     └──────┘                                    │
//!  │ pad                                                          │
//!  │     ┌─cell─┐ ...                                             │
//! ```
//!
//! Cells are square. Each source is shrunk to fit its cell (never enlarged)
//! and centered inside it.

use crate::config::MontageSettings;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{count} images do not fit on a {size}x{size} canvas")]
    CanvasTooSmall { count: usize, size: u32 },
}

/// Number of grid columns for `count` images.
///
/// | count | columns |
/// |---|---|
/// | 1, 2 | 1 |
/// | 3, 4 | 2 |
/// | 5+ | 5 |
///
/// A count of 0 never reaches layout; it maps to 1 for totality.
pub fn column_count(count: usize) -> usize {
    match count {
        0..=2 => 1,
        3 | 4 => 2,
        _ => 5,
    }
}

/// Grid geometry for one montage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    pub count: usize,
    pub columns: usize,
    pub rows: usize,
    /// Side length of each square cell.
    pub cell_size: u32,
    /// Gap between and around cells. Zero for a single image.
    pub padding: u32,
}

/// Where one source image lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedThumbnail {
    /// Top-left corner of the cell on the canvas.
    pub origin: (u32, u32),
    /// Top-left corner of the resized image inside the cell.
    pub offset: (u32, u32),
    /// Resized width.
    pub width: u32,
    /// Resized height.
    pub height: u32,
}

impl PlacedThumbnail {
    /// Top-left corner of the resized image on the canvas.
    pub fn canvas_position(&self) -> (u32, u32) {
        (self.origin.0 + self.offset.0, self.origin.1 + self.offset.1)
    }
}

impl LayoutPlan {
    /// Compute the plan for `count` images.
    ///
    /// Returns `Ok(None)` for an empty set. A single image fills the whole
    /// canvas with no padding; otherwise the cell is the largest square that
    /// fits the grid with padding on every side, capped at
    /// `thumbnail_max_size`.
    pub fn compute(count: usize, settings: &MontageSettings) -> Result<Option<Self>, LayoutError> {
        if count == 0 {
            return Ok(None);
        }
        let columns = column_count(count);
        let rows = count.div_ceil(columns);

        if count == 1 {
            return Ok(Some(Self {
                count,
                columns,
                rows,
                cell_size: settings.size,
                padding: 0,
            }));
        }

        let size = i64::from(settings.size);
        let padding = i64::from(settings.padding);
        let max_cell_width = (size - padding * (columns as i64 + 1)) / columns as i64;
        let max_cell_height = (size - padding * (rows as i64 + 1)) / rows as i64;
        let cell = max_cell_width
            .min(max_cell_height)
            .min(i64::from(settings.thumbnail_max_size));

        if cell < 1 {
            return Err(LayoutError::CanvasTooSmall {
                count,
                size: settings.size,
            });
        }

        Ok(Some(Self {
            count,
            columns,
            rows,
            cell_size: cell as u32,
            padding: settings.padding,
        }))
    }

    /// Top-left corner of the cell at `index` (row-major).
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let col = (index % self.columns) as u32;
        let row = (index / self.columns) as u32;
        let stride = self.cell_size + self.padding;
        (self.padding + col * stride, self.padding + row * stride)
    }

    /// Full placement of a `source`-sized image at `index`.
    pub fn place(&self, index: usize, source: (u32, u32)) -> PlacedThumbnail {
        let (width, height) = shrink_to_fit(source, self.cell_size);
        PlacedThumbnail {
            origin: self.cell_origin(index),
            offset: center_offset(self.cell_size, (width, height)),
            width,
            height,
        }
    }

    /// Width and height of the grid including outer padding.
    pub fn grid_extent(&self) -> (u32, u32) {
        let extent = |n: usize| n as u32 * self.cell_size + (n as u32 + 1) * self.padding;
        (extent(self.columns), extent(self.rows))
    }
}

/// Shrink `(width, height)` to fit a `bound × bound` square, keeping the aspect ratio.
///
/// Images already within bounds are returned unchanged. Otherwise the longer
/// side becomes exactly `bound` and the shorter side is rounded, never below 1.
pub fn shrink_to_fit(source: (u32, u32), bound: u32) -> (u32, u32) {
    let (w, h) = source;
    if w <= bound && h <= bound {
        return (w, h);
    }
    let scaled = |short: u32, long: u32| -> u32 {
        let (short, long, bound) = (u64::from(short), u64::from(long), u64::from(bound));
        ((short * bound + long / 2) / long).clamp(1, bound) as u32
    };
    if w >= h {
        (bound, scaled(h, w))
    } else {
        (scaled(w, h), bound)
    }
}

/// Offset that centers `(width, height)` in a `cell × cell` square.
pub fn center_offset(cell: u32, (width, height): (u32, u32)) -> (u32, u32) {
    (
        cell.saturating_sub(width) / 2,
        cell.saturating_sub(height) / 2,
    )
}
