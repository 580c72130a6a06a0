//! Host document patching.
//!
//! The generated block lives after a fixed marker in the host document:
//!
//! ```markdown
//! # Project
//!
//! Hand-written introduction, kept verbatim.
//!
//! <!-- AUTO-GENERATED-TABLE -->
//! ...everything from here on is regenerated...
//! ```
//!
//! Text before the first marker is never touched. A document without the
//! marker gets one appended; a missing document is created from a minimal
//! template.

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to the document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The document did not exist and was synthesized.
    Created,
    /// The document changed and was rewritten.
    Updated,
    /// The regenerated text was identical; nothing was written.
    Unchanged,
}

/// Minimal document used when none exists yet.
pub fn default_document(marker: &str) -> String {
    format!("# Modules\n\n## Overview\n\n{marker}\n\n")
}

/// Replace everything after the first `marker` with `generated`.
///
/// Without a marker, the marker and block are appended after a blank line.
pub fn splice(document: &str, marker: &str, generated: &str) -> String {
    match document.find(marker) {
        Some(pos) => {
            let mut out = String::with_capacity(pos + marker.len() + generated.len());
            out.push_str(&document[..pos]);
            out.push_str(marker);
            out.push_str(generated);
            out
        }
        None => format!("{document}\n\n{marker}{generated}"),
    }
}

/// Splice `generated` into the document at `path`, creating it if needed.
pub fn update_document(
    path: &Path,
    marker: &str,
    generated: &str,
) -> Result<DocumentOutcome, DocumentError> {
    let io_error = |source: std::io::Error| DocumentError::Io {
        path: path.display().to_string(),
        source,
    };

    let existing = if path.exists() {
        Some(fs::read_to_string(path).map_err(io_error)?)
    } else {
        tracing::info!(path = %path.display(), "document not found, creating it");
        None
    };

    let base = existing
        .clone()
        .unwrap_or_else(|| default_document(marker));
    let updated = splice(&base, marker, generated);

    if existing.as_deref() == Some(updated.as_str()) {
        return Ok(DocumentOutcome::Unchanged);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, &updated).map_err(io_error)?;

    Ok(match existing {
        Some(_) => DocumentOutcome::Updated,
        None => DocumentOutcome::Created,
    })
}
