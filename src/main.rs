use clap::{Parser, Subcommand};
use module_index::imaging::RustBackend;
use module_index::{config, output, update};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "module-index")]
#[command(about = "Regenerate the README module table and thumbnail montage")]
#[command(long_about = "\
Regenerate the README module table and thumbnail montage

Run without arguments from the project root. Every module directory with a
metadata.yaml becomes one table row; every asset whose name contains
\"thumbnail\" is tiled into the montage.

Project structure:

  .
  ├── index.toml                     # Optional config (see gen-config)
  ├── README.md                      # Table goes after <!-- AUTO-GENERATED-TABLE -->
  ├── assets/
  │   └── thumbnail_montage.jpg      # Generated montage
  └── modules/
      ├── alpha/
      │   ├── metadata.yaml          # name, description, license, tag, note, source.*
      │   └── assets/
      │       └── 01_thumbnail.png
      └── beta/
          └── metadata.yaml

Missing metadata fields render as placeholders. Set RUST_LOG=debug for
detailed diagnostics.")]
#[command(version)]
struct Cli {
    /// Project root containing index.toml, the README and the modules directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the README table and montage (default)
    Update,
    /// Scan modules and print the catalog without writing anything
    Check,
    /// Print a stock index.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Update) {
        Command::Update => {
            let project = update::Project::load(&cli.root)?;

            println!("==> Scanning {}", project.modules_dir().display());
            let catalog = update::collect(&project)?;
            output::print_catalog(&catalog, &project.modules_dir(), &project.root);

            println!("==> Updating {}", project.readme_path().display());
            let block = update::render(&project, &catalog);
            let outcome = update::write_document(&project, &block)?;
            output::print_document_outcome(&project.readme_path(), &project.root, outcome);

            println!("==> Building montage");
            let montage = update::write_montage(&project, &catalog, &RustBackend::new())?;
            output::print_montage_outcome(&montage, &project.root);

            println!("==> Done");
        }
        Command::Check => {
            let project = update::Project::load(&cli.root)?;
            println!("==> Checking {}", project.modules_dir().display());
            let catalog = update::collect(&project)?;
            output::print_catalog(&catalog, &project.modules_dir(), &project.root);
            println!("==> {} modules, {} thumbnails", catalog.modules.len(), catalog.thumbnail_count());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
