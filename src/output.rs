//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each module leads with its positional index and display name; the module
//! id and thumbnail files follow as indented context lines. Paths are shown
//! relative to the project root.
//!
//! ```text
//! Modules
//! 001 Depth Estimator (2 thumbnails)
//!     Source: modules/depth/
//!     01_thumbnail.png
//!     02_thumbnail.png
//! 002 beta
//!     Source: modules/beta/
//!
//! README.md: updated
//! Montage: assets/thumbnail_montage.jpg (3 images, 2 columns, 100px cells)
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function is pure and returns `Vec<String>` for testability;
//! the matching `print_*` wrapper writes to stdout.

use crate::document::DocumentOutcome;
use crate::scan::Catalog;
use crate::update::MontageOutcome;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Display `path` relative to `root` when possible.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

// ============================================================================
// Catalog
// ============================================================================

/// Format the scanned catalog: one header per module plus its thumbnails.
pub fn format_catalog(catalog: &Catalog, modules_dir: &Path, root: &Path) -> Vec<String> {
    let mut lines = vec!["Modules".to_string()];
    if catalog.modules.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }

    for (i, entry) in catalog.modules.iter().enumerate() {
        let count = entry.thumbnails.len();
        let header = if count == 0 {
            format!("{} {}", format_index(i + 1), entry.record.name)
        } else {
            format!(
                "{} {} ({})",
                format_index(i + 1),
                entry.record.name,
                plural(count, "thumbnail")
            )
        };
        lines.push(header);

        lines.push(format!(
            "    Source: {}/",
            display_path(&modules_dir.join(&entry.record.id), root)
        ));

        for thumbnail in &entry.thumbnails {
            let name = thumbnail
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            lines.push(format!("    {name}"));
        }
    }
    lines
}

pub fn print_catalog(catalog: &Catalog, modules_dir: &Path, root: &Path) {
    for line in format_catalog(catalog, modules_dir, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Document
// ============================================================================

pub fn format_document_outcome(path: &Path, root: &Path, outcome: DocumentOutcome) -> String {
    let status = match outcome {
        DocumentOutcome::Created => "created",
        DocumentOutcome::Updated => "updated",
        DocumentOutcome::Unchanged => "unchanged",
    };
    format!("{}: {}", display_path(path, root), status)
}

pub fn print_document_outcome(path: &Path, root: &Path, outcome: DocumentOutcome) {
    println!("{}", format_document_outcome(path, root, outcome));
}

// ============================================================================
// Montage
// ============================================================================

pub fn format_montage_outcome(outcome: &MontageOutcome, root: &Path) -> String {
    match outcome {
        MontageOutcome::Written(summary) => format!(
            "Montage: {} ({}, {}, {}px cells)",
            display_path(&summary.path, root),
            plural(summary.images, "image"),
            plural(summary.plan.columns, "column"),
            summary.plan.cell_size
        ),
        MontageOutcome::NoThumbnails => "Montage: skipped (no thumbnails found)".to_string(),
        MontageOutcome::Disabled => "Montage: disabled".to_string(),
    }
}

pub fn print_montage_outcome(outcome: &MontageOutcome, root: &Path) {
    println!("{}", format_montage_outcome(outcome, root));
}
