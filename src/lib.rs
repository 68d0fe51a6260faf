//! folio-rs: build-time content pipeline for a blog and portfolio site
//!
//! Loads posts, writings and projects from Markdown front-matter, validates
//! them, sorts them newest first and writes the artifacts the rendering layer
//! consumes: Open Graph preview images, a JSON content manifest and an Atom
//! feed.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod og;
pub mod query;

use anyhow::Result;
use std::path::Path;

pub use error::ContentError;

/// Name of the configuration file in the site base directory
pub const CONFIG_FILE: &str = "folio.yml";

/// The main application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (one subdirectory per collection)
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            let mut config = config::SiteConfig::default();
            config.resolve_env(|key| std::env::var(key).ok());
            config
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an already built configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// The filesystem content source for this site
    pub fn source(&self) -> content::FsContentSource {
        content::FsContentSource::new(&self.content_dir)
    }

    /// Build every artifact
    pub fn generate(&self) -> Result<generator::BuildReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new content file
    pub fn new_entry(&self, title: &str, kind: content::ContentKind) -> Result<std::path::PathBuf> {
        commands::new::create_entry(self, title, kind)
    }
}
