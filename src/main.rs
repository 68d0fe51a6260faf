//! CLI entry point for folio-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::content::ContentKind;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Build-time content pipeline for a blog and portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate content and write build artifacts
    #[command(alias = "g")]
    Generate,

    /// Create a new post, writing or project
    New {
        /// Kind of entry (post, writing, project)
        #[arg(short, long, default_value = "post")]
        kind: String,

        /// Title of the new entry
        title: String,
    },

    /// Clean the output folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (posts, writings, projects, tags)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Generate => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating build artifacts...");
            let report = folio.generate()?;
            println!(
                "Generated {} OG images for {} entries{}",
                report.og_images,
                report.entries,
                if report.feed { " and atom.xml" } else { "" }
            );
        }

        Commands::New { kind, title } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let kind = ContentKind::from_name(&kind).with_context(|| {
                format!("Unknown kind: {}. Available: post, writing, project", kind)
            })?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            let path = folio.new_entry(&title, kind)?;
            println!("Created: {:?}", path);
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type)?;
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
