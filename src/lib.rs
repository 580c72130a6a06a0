//! # module-index
//!
//! Regenerates the module table of a project README and a thumbnail montage
//! image from a directory of per-module metadata. The filesystem is the data
//! source: every `modules/<id>/metadata.yaml` becomes a table row, and every
//! `modules/<id>/assets/*thumbnail*` file becomes a montage tile.
//!
//! # Pipeline
//!
//! ```text
//! 1. Collect   modules/   →  Catalog          (metadata + thumbnails, sorted)
//! 2. Render    Catalog    →  Markdown block   (table + montage reference)
//! 3. Patch     block      →  README.md        (everything after the marker)
//! 4. Montage   Catalog    →  montage image    (decode → layout → encode)
//! ```
//!
//! Every run recomputes everything from disk. Inputs are sorted by name at
//! every level so two runs over the same tree produce identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `index.toml` loading, stock defaults, validation |
//! | [`metadata`] | `metadata.yaml` parsing and default substitution |
//! | [`scan`] | Module and thumbnail discovery, [`scan::Catalog`] |
//! | [`table`] | Markdown table rendering |
//! | [`document`] | Marker splice and README write-back |
//! | [`imaging`] | Montage layout engine, codec trait, `image`-crate backend |
//! | [`update`] | Stage functions and the full [`update::run`] |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pure Layout Engine
//!
//! [`imaging::compose`] takes decoded rasters and returns a raster. It never
//! touches the filesystem, so layout rules (column count, cell size,
//! centering, padding) are tested with in-memory images. Decoding and saving
//! live behind the [`imaging::ImageBackend`] trait.
//!
//! ## Two Thumbnail Policies
//!
//! The table shows at most `table.max_thumbnails` thumbnails per module. The
//! montage uses every thumbnail of every module. Both read the same
//! [`scan::Catalog`]; the cap is applied by the table renderer only.
//!
//! ## Recoverable vs Fatal Errors
//!
//! A broken `metadata.yaml` is logged and rendered with defaults. A missing
//! `assets/` folder means no thumbnails. A missing README is created. Image
//! decode/encode errors abort the montage, and write errors abort the run;
//! the README is always written first so a bad thumbnail never blocks the
//! table.

pub mod config;
pub mod document;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod table;
pub mod update;
