//! The full regeneration pipeline.
//!
//! ```text
//! modules/ ──collect──► Catalog ──render──► block ──splice──► README.md
//!                          │
//!                          └──montage_sources──► decode ► compose ► encode ──► montage image
//! ```
//!
//! Each stage is a separate function so the CLI can report progress between
//! them; [`run`] chains them for library callers and tests. The document is
//! written before the montage is attempted, so a broken thumbnail never blocks
//! the table update. The two writes are independent: a montage failure leaves
//! the freshly written document in place.

use crate::config::{ConfigError, IndexConfig};
use crate::document::{self, DocumentError, DocumentOutcome};
use crate::imaging::{ImageBackend, MontageError, MontageSummary, create_montage};
use crate::scan::{self, Catalog, ScanError};
use crate::table;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    #[error("Montage error: {0}")]
    Montage(#[from] MontageError),
}

/// A project root paired with its resolved configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: IndexConfig,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: IndexConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Load `index.toml` from `root` (defaults when absent).
    pub fn load(root: &Path) -> Result<Self, UpdateError> {
        let config = crate::config::load_config(root)?;
        Ok(Self::new(root, config))
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.modules_dir)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.readme)
    }

    pub fn montage_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.montage)
    }

    /// Whether this run will produce a montage for `catalog`.
    pub fn produces_montage(&self, catalog: &Catalog) -> bool {
        self.config.montage.enabled && catalog.thumbnail_count() > 0
    }
}

/// What the montage stage did.
#[derive(Debug, Clone, PartialEq)]
pub enum MontageOutcome {
    Written(MontageSummary),
    /// No module has a thumbnail; no file was written.
    NoThumbnails,
    /// `montage.enabled = false`.
    Disabled,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub catalog: Catalog,
    pub document_path: PathBuf,
    pub document: DocumentOutcome,
    pub montage: MontageOutcome,
}

/// Stage 1: scan the modules directory.
pub fn collect(project: &Project) -> Result<Catalog, UpdateError> {
    Ok(scan::collect(&project.modules_dir())?)
}

/// Stage 2: render the block that follows the marker.
pub fn render(project: &Project, catalog: &Catalog) -> String {
    let montage = project
        .produces_montage(catalog)
        .then_some(project.config.paths.montage.as_str());
    table::render_block(catalog, &project.config, montage)
}

/// Stage 3: splice the block into the host document.
pub fn write_document(project: &Project, block: &str) -> Result<DocumentOutcome, UpdateError> {
    Ok(document::update_document(
        &project.readme_path(),
        &project.config.table.marker,
        block,
    )?)
}

/// Stage 4: compose and save the montage from every thumbnail in the catalog.
pub fn write_montage(
    project: &Project,
    catalog: &Catalog,
    backend: &impl ImageBackend,
) -> Result<MontageOutcome, UpdateError> {
    if !project.config.montage.enabled {
        return Ok(MontageOutcome::Disabled);
    }
    let sources = catalog.montage_sources();
    let summary = create_montage(
        backend,
        &sources,
        &project.config.montage,
        &project.montage_path(),
    )?;
    Ok(summary.map_or(MontageOutcome::NoThumbnails, MontageOutcome::Written))
}

/// Run every stage in order.
pub fn run(project: &Project, backend: &impl ImageBackend) -> Result<UpdateReport, UpdateError> {
    let catalog = collect(project)?;
    let block = render(project, &catalog);
    let document = write_document(project, &block)?;
    let montage = write_montage(project, &catalog, backend)?;
    Ok(UpdateReport {
        catalog,
        document_path: project.readme_path(),
        document,
        montage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use image::DynamicImage;
    use std::fs;
    use tempfile::TempDir;

    fn module(root: &Path, id: &str, thumbnails: &[&str]) {
        let dir = root.join("modules").join(id);
        fs::create_dir_all(dir.join("assets")).unwrap();
        fs::write(dir.join("metadata.yaml"), format!("name: {id}\n")).unwrap();
        for t in thumbnails {
            fs::write(dir.join("assets").join(t), b"placeholder").unwrap();
        }
    }

    #[test]
    fn project_paths_resolve_against_root() {
        let project = Project::new("/proj", IndexConfig::default());
        assert_eq!(project.modules_dir(), PathBuf::from("/proj/modules"));
        assert_eq!(project.readme_path(), PathBuf::from("/proj/README.md"));
        assert_eq!(
            project.montage_path(),
            PathBuf::from("/proj/assets/thumbnail_montage.jpg")
        );
    }

    #[test]
    fn render_mentions_montage_only_when_one_is_produced() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "a", &[]);
        let project = Project::new(tmp.path(), IndexConfig::default());
        let catalog = collect(&project).unwrap();
        assert!(!render(&project, &catalog).contains("montage"));

        module(tmp.path(), "b", &["thumbnail.png"]);
        let catalog = collect(&project).unwrap();
        assert!(render(&project, &catalog).contains("![Thumbnail montage]"));

        let mut disabled = project.clone();
        disabled.config.montage.enabled = false;
        assert!(!render(&disabled, &catalog).contains("montage"));
    }

    #[test]
    fn run_without_thumbnails_writes_only_document() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "a", &[]);
        let project = Project::new(tmp.path(), IndexConfig::default());
        let backend = MockBackend::new();

        let report = run(&project, &backend).unwrap();

        assert_eq!(report.document, DocumentOutcome::Created);
        assert_eq!(report.montage, MontageOutcome::NoThumbnails);
        assert!(backend.get_operations().is_empty());
        assert!(!project.montage_path().exists());
    }

    #[test]
    fn run_disabled_montage_skips_decoding() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "a", &["thumbnail.png"]);
        let mut config = IndexConfig::default();
        config.montage.enabled = false;
        let project = Project::new(tmp.path(), config);
        let backend = MockBackend::new();

        let report = run(&project, &backend).unwrap();

        assert_eq!(report.montage, MontageOutcome::Disabled);
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn montage_failure_still_leaves_document_written() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "a", &["thumbnail.png"]);
        let project = Project::new(tmp.path(), IndexConfig::default());
        // No mock image registered: every decode fails
        let backend = MockBackend::new();

        let result = run(&project, &backend);

        assert!(matches!(result, Err(UpdateError::Montage(_))));
        let readme = fs::read_to_string(project.readme_path()).unwrap();
        assert!(readme.contains("[a](./modules/a)"));
    }

    #[test]
    fn run_passes_flattened_sources_to_backend() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "b", &["thumbnail.png"]);
        module(tmp.path(), "a", &["2_thumbnail.png", "1_thumbnail.png"]);
        let project = Project::new(tmp.path(), IndexConfig::default());

        let assets = |id: &str, name: &str| {
            project
                .modules_dir()
                .join(id)
                .join("assets")
                .join(name)
                .to_string_lossy()
                .to_string()
        };
        let backend = MockBackend::new()
            .with_image(&assets("a", "1_thumbnail.png"), DynamicImage::new_rgb8(4, 4))
            .with_image(&assets("a", "2_thumbnail.png"), DynamicImage::new_rgb8(4, 4))
            .with_image(&assets("b", "thumbnail.png"), DynamicImage::new_rgb8(4, 4));

        let report = run(&project, &backend).unwrap();

        let decoded: Vec<RecordedOp> = backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Decode(_)))
            .collect();
        assert_eq!(
            decoded,
            vec![
                RecordedOp::Decode(assets("a", "1_thumbnail.png")),
                RecordedOp::Decode(assets("a", "2_thumbnail.png")),
                RecordedOp::Decode(assets("b", "thumbnail.png")),
            ]
        );
        assert!(matches!(
            report.montage,
            MontageOutcome::Written(MontageSummary { images: 3, .. })
        ));
    }

    #[test]
    fn missing_modules_dir_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let project = Project::new(tmp.path(), IndexConfig::default());
        let result = run(&project, &MockBackend::new());
        assert!(matches!(
            result,
            Err(UpdateError::Scan(ScanError::MissingModulesDir(_)))
        ));
        assert!(!project.readme_path().exists());
    }
}
