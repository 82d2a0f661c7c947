use clap::{Parser, Subcommand};
use pubpages::config::{self, PathsConfig, SiteConfig};
use pubpages::{generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pubpages")]
#[command(about = "Generate publication pages from a BibTeX bibliography")]
#[command(long_about = "\
Generate publication pages from a BibTeX bibliography

Every entry in the bibliography becomes a standalone HTML page named
YYYY-MM-slug.html, and the archive region of the existing publications index
page is regenerated with the entries grouped by type.

Site layout (defaults, all configurable in config.toml):

  ./
  ├── config.toml                      # Optional, see 'pubpages gen-config'
  ├── my_publications.bib              # Input bibliography
  └── docs/
      ├── publication/                 # One page per entry (created)
      │   └── 2023-01-a-study-of-gf2-codes.html
      └── publications/
          └── index.html               # Existing page, archive region replaced

Index groups, in order: Journal Articles (@article), Book Chapters
(@incollection), Conference Papers (@inproceedings, @conference), Theses
(@phdthesis), Other Publications (everything else).")]
#[command(version)]
struct Cli {
    /// Site root: holds config.toml, relative config paths resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Bibliography file (overrides paths.bibliography)
    #[arg(long, global = true)]
    bibliography: Option<PathBuf>,

    /// Output directory for detail pages (overrides paths.output_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Publications index page (overrides paths.index_file)
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Show debug diagnostics (skipped entries and fields, every file write)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the detail pages and regenerate the index
    Build,
    /// Parse the bibliography and list what would be generated
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            let paths = resolve_paths(&cli, &site_config);
            println!("==> Parsing {}", paths.bibliography.display());
            generate::build(&paths, &site_config, |event| {
                output::print_build_event(&event)
            })?;
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            let paths = resolve_paths(&cli, &site_config);
            println!("==> Checking {}", paths.bibliography.display());
            let records = generate::load_records(&paths.bibliography)?;
            output::print_check_output(&records);
            println!("==> Bibliography is readable");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Config paths resolved against `--root`, with command-line overrides taken
/// as given.
fn resolve_paths(cli: &Cli, site_config: &SiteConfig) -> PathsConfig {
    let mut paths = site_config.paths.resolve(&cli.root);
    if let Some(bibliography) = &cli.bibliography {
        paths.bibliography = bibliography.clone();
    }
    if let Some(output) = &cli.output {
        paths.output_dir = output.clone();
    }
    if let Some(index) = &cli.index {
        paths.index_file = index.clone();
    }
    paths
}
