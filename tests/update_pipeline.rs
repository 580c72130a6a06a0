//! End-to-end runs of the update pipeline against real files.
//!
//! Thumbnails are solid-color PNGs and the montage is written as PNG so
//! pixel checks are exact.

use image::{Rgb, RgbImage};
use module_index::document::DocumentOutcome;
use module_index::imaging::RustBackend;
use module_index::update::{self, MontageOutcome, Project, UpdateError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

const MARKER: &str = "<!-- AUTO-GENERATED-TABLE -->";

fn write_config(root: &Path) {
    fs::write(
        root.join("index.toml"),
        "[paths]\nmontage = \"assets/montage.png\"\n",
    )
    .unwrap();
}

fn write_module(root: &Path, id: &str, metadata: &str, thumbnails: &[(&str, Rgb<u8>)]) {
    let dir = root.join("modules").join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("metadata.yaml"), metadata).unwrap();
    if thumbnails.is_empty() {
        return;
    }
    fs::create_dir_all(dir.join("assets")).unwrap();
    for (name, color) in thumbnails {
        RgbImage::from_pixel(100, 100, *color)
            .save(dir.join("assets").join(name))
            .unwrap();
    }
}

/// alpha: 2 thumbnails, beta: none, gamma: 1 thumbnail.
fn three_module_project(root: &Path, order: &[&str]) {
    write_config(root);
    for id in order {
        match *id {
            "alpha" => write_module(
                root,
                "alpha",
                "name: Alpha\ndescription: First\nlicense: MIT\n",
                &[("1_thumbnail.png", RED), ("2_thumbnail.png", GREEN)],
            ),
            "beta" => write_module(root, "beta", "name: Beta\nlicense: Apache-2.0\n", &[]),
            "gamma" => write_module(
                root,
                "gamma",
                "name: Gamma\nlicense: BSD\n",
                &[("thumbnail.png", BLUE)],
            ),
            other => panic!("unknown module {other}"),
        }
    }
}

fn table_rows(readme: &str) -> Vec<&str> {
    readme
        .lines()
        .filter(|l| l.starts_with("| ") && !l.starts_with("| Thumbnails"))
        .collect()
}

#[test]
fn three_modules_produce_ordered_rows_and_two_column_montage() {
    let tmp = TempDir::new().unwrap();
    three_module_project(tmp.path(), &["alpha", "beta", "gamma"]);
    let project = Project::load(tmp.path()).unwrap();

    let report = update::run(&project, &RustBackend::new()).unwrap();

    assert_eq!(report.document, DocumentOutcome::Created);
    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert!(readme.contains("![Thumbnail montage](./assets/montage.png)"));

    let rows = table_rows(&readme);
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains("[Alpha](./modules/alpha)"));
    assert!(rows[0].contains(
        "![Thumbnail](./modules/alpha/assets/1_thumbnail.png) ![Thumbnail](./modules/alpha/assets/2_thumbnail.png)"
    ));
    assert!(rows[1].starts_with("|  | [Beta](./modules/beta)"));
    assert!(rows[2].contains("[Gamma](./modules/gamma)"));

    let MontageOutcome::Written(summary) = &report.montage else {
        panic!("expected a montage, got {:?}", report.montage);
    };
    assert_eq!(summary.images, 3);
    assert_eq!(summary.plan.columns, 2);
    assert_eq!(summary.plan.cell_size, 100);

    let montage = image::open(tmp.path().join("assets/montage.png"))
        .unwrap()
        .to_rgb8();
    assert_eq!(montage.dimensions(), (500, 500));
    // Cell origins (5,5), (110,5), (5,110) in catalog order
    assert_eq!(*montage.get_pixel(5, 5), RED);
    assert_eq!(*montage.get_pixel(104, 104), RED);
    assert_eq!(*montage.get_pixel(110, 5), GREEN);
    assert_eq!(*montage.get_pixel(5, 110), BLUE);
    // Padding and the empty fourth cell stay background
    assert_eq!(*montage.get_pixel(2, 2), WHITE);
    assert_eq!(*montage.get_pixel(107, 50), WHITE);
    assert_eq!(*montage.get_pixel(150, 150), WHITE);
    assert_eq!(*montage.get_pixel(499, 499), WHITE);
}

#[test]
fn second_run_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    three_module_project(tmp.path(), &["alpha", "beta", "gamma"]);
    let project = Project::load(tmp.path()).unwrap();
    let backend = RustBackend::new();

    update::run(&project, &backend).unwrap();
    let readme_first = fs::read(tmp.path().join("README.md")).unwrap();
    let montage_first = fs::read(tmp.path().join("assets/montage.png")).unwrap();

    let report = update::run(&project, &backend).unwrap();

    assert_eq!(report.document, DocumentOutcome::Unchanged);
    assert_eq!(fs::read(tmp.path().join("README.md")).unwrap(), readme_first);
    assert_eq!(
        fs::read(tmp.path().join("assets/montage.png")).unwrap(),
        montage_first
    );
}

#[test]
fn output_does_not_depend_on_creation_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    three_module_project(first.path(), &["alpha", "beta", "gamma"]);
    three_module_project(second.path(), &["gamma", "alpha", "beta"]);

    let backend = RustBackend::new();
    update::run(&Project::load(first.path()).unwrap(), &backend).unwrap();
    update::run(&Project::load(second.path()).unwrap(), &backend).unwrap();

    for file in ["README.md", "assets/montage.png"] {
        assert_eq!(
            fs::read(first.path().join(file)).unwrap(),
            fs::read(second.path().join(file)).unwrap(),
            "{file} differs"
        );
    }
}

#[test]
fn missing_license_renders_unknown() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path());
    write_module(tmp.path(), "solo", "name: Solo\n", &[]);
    let project = Project::load(tmp.path()).unwrap();

    update::run(&project, &RustBackend::new()).unwrap();

    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    let rows = table_rows(&readme);
    assert_eq!(rows.len(), 1);
    let cells: Vec<&str> = rows[0].split(" | ").collect();
    assert_eq!(cells[6], "Unknown");
}

#[test]
fn text_before_marker_is_preserved() {
    let tmp = TempDir::new().unwrap();
    three_module_project(tmp.path(), &["alpha", "beta", "gamma"]);
    let prefix = "# My Project\n\nHand-written intro | with a pipe.\n\n";
    fs::write(
        tmp.path().join("README.md"),
        format!("{prefix}{MARKER}\n\nstale table\n"),
    )
    .unwrap();
    let project = Project::load(tmp.path()).unwrap();

    let report = update::run(&project, &RustBackend::new()).unwrap();

    assert_eq!(report.document, DocumentOutcome::Updated);
    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert!(readme.starts_with(&format!("{prefix}{MARKER}\n\n")));
    assert!(!readme.contains("stale table"));
    assert_eq!(table_rows(&readme).len(), 3);
}

#[test]
fn no_thumbnails_means_no_montage_file() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path());
    write_module(tmp.path(), "alpha", "name: Alpha\n", &[]);
    write_module(tmp.path(), "beta", "name: Beta\n", &[]);
    let project = Project::load(tmp.path()).unwrap();

    let report = update::run(&project, &RustBackend::new()).unwrap();

    assert_eq!(report.montage, MontageOutcome::NoThumbnails);
    assert!(!tmp.path().join("assets/montage.png").exists());
    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert!(!readme.contains("Thumbnail montage"));
    assert_eq!(table_rows(&readme).len(), 2);
}

#[test]
fn corrupt_thumbnail_fails_montage_but_keeps_readme() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path());
    write_module(tmp.path(), "alpha", "name: Alpha\n", &[("1_thumbnail.png", RED)]);
    fs::write(
        tmp.path().join("modules/alpha/assets/2_thumbnail.png"),
        b"not an image",
    )
    .unwrap();
    let project = Project::load(tmp.path()).unwrap();

    let result = update::run(&project, &RustBackend::new());

    assert!(matches!(result, Err(UpdateError::Montage(_))));
    assert!(!tmp.path().join("assets/montage.png").exists());
    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert!(readme.contains("[Alpha](./modules/alpha)"));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("index.toml"), "[montage]\nsize = 0\n").unwrap();
    assert!(matches!(
        Project::load(tmp.path()),
        Err(UpdateError::Config(_))
    ));
}

#[test]
fn nested_readme_links_back_to_root() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("index.toml"),
        "[paths]\nreadme = \"docs/README.md\"\nmontage = \"assets/montage.png\"\n",
    )
    .unwrap();
    write_module(tmp.path(), "alpha", "name: Alpha\n", &[("thumbnail.png", RED)]);
    let project = Project::load(tmp.path()).unwrap();

    update::run(&project, &RustBackend::new()).unwrap();

    let readme = fs::read_to_string(tmp.path().join("docs/README.md")).unwrap();
    assert!(readme.contains("![Thumbnail montage](../assets/montage.png)"));
    assert!(readme.contains("![Thumbnail](../modules/alpha/assets/thumbnail.png)"));
    assert!(readme.contains("[Alpha](../modules/alpha)"));
}
