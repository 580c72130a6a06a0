//! Markdown table rendering.
//!
//! One row per module, in catalog order, with a fixed column layout:
//!
//! ```text
//! | Thumbnails | Module Name | Description | Publication | Original Git Repository | Original Data Repository | License | Tags | Notes |
//! ```
//!
//! Link lists render as `[🔗](url)` separated by `, `; an empty list renders
//! the `None` placeholder. Thumbnails render as inline images, at most
//! `max_thumbnails` per row.
//!
//! Links are relative to the directory holding the README, so a document at
//! `docs/README.md` links to `../modules/<id>`.
//!
//! The rendered block is framed by blank lines on both sides so splicing it
//! after the marker gives the same document on every run.

use crate::config::IndexConfig;
use crate::metadata::NONE_PLACEHOLDER;
use crate::scan::{Catalog, ModuleEntry};
use std::path::{Component, Path};

const HEADER: &str = "| Thumbnails | Module Name | Description | Publication | Original Git Repository | Original Data Repository | License | Tags | Notes |";
const SEPARATOR: &str = "|------------|------------|------------------|-------------|--------------------|----------------------|----------------------|-----------------------------|------|";

/// Separator between multiple links or tags in one cell.
const LIST_SEPARATOR: &str = ", ";

/// Render the generated block: optional montage reference, then the table.
///
/// `montage` is the montage path relative to the project root, present only
/// when a montage is being produced.
pub fn render_block(catalog: &Catalog, config: &IndexConfig, montage: Option<&str>) -> String {
    let mut out = String::from("\n\n");
    if let Some(path) = montage {
        out.push_str(&format!(
            "![Thumbnail montage]({})\n\n",
            readme_link(&config.paths.readme, path)
        ));
    }
    out.push_str(&render_table(catalog, config));
    out.push_str("\n\n");
    out
}

/// Render the header, separator and one line per module, newline-terminated.
pub fn render_table(catalog: &Catalog, config: &IndexConfig) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    for entry in &catalog.modules {
        out.push_str(&render_row(entry, config));
        out.push('\n');
    }
    out
}

/// Render a single module row (no trailing newline).
pub fn render_row(entry: &ModuleEntry, config: &IndexConfig) -> String {
    let record = &entry.record;
    let module_link = readme_link(
        &config.paths.readme,
        &format!("{}/{}", link_root(&config.paths.modules_dir), record.id),
    );

    let thumbnails = entry
        .table_thumbnails(config.table.max_thumbnails)
        .iter()
        .map(|path| {
            format!(
                "![Thumbnail]({}/{}/{})",
                module_link,
                crate::scan::ASSETS_DIR,
                file_name(path)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let cells = [
        thumbnails,
        format!("[{}]({})", escape_cell(&record.name), module_link),
        escape_cell(&record.description),
        link_list(&record.publications),
        link_list(&record.git_repositories),
        link_list(&record.data_repositories),
        escape_cell(&record.license),
        escape_cell(&record.tags.join(LIST_SEPARATOR)),
        escape_cell(&record.note),
    ];
    format!("| {} |", cells.join(" | "))
}

fn link_list(urls: &[String]) -> String {
    if urls.is_empty() {
        return NONE_PLACEHOLDER.to_string();
    }
    urls.iter()
        .map(|url| format!("[🔗]({})", escape_cell(url.trim())))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Keep free text from breaking the row: pipes are escaped and line breaks
/// collapse to spaces.
fn escape_cell(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

/// Root-relative path as used inside links: forward slashes, no leading `./`.
fn link_root(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized
        .trim_start_matches("./")
        .trim_end_matches('/')
        .to_string()
}

/// Link to the root-relative `target` from the directory holding `readme`.
fn readme_link(readme: &str, target: &str) -> String {
    let depth = Path::new(readme)
        .parent()
        .map(|dir| {
            dir.components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .count()
        })
        .unwrap_or(0);
    let prefix = if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    };
    format!("{prefix}{}", link_root(target))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
