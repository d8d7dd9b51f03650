//! folio: content pipeline and static exports for a personal site and blog
//!
//! Posts are markdown files with YAML frontmatter. This crate loads and
//! validates them, serves them through an in-memory post directory, computes
//! per-page head metadata, and writes the artifacts a static host needs:
//! `sitemap.xml`, `rss.xml` and one folder per client route.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod meta;
pub mod routes;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use content::{About, ContentError, PostDirectory};

/// Configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post markdown files
    pub content_dir: PathBuf,
    /// Output directory, where the shell document lives
    pub output_dir: PathBuf,
    /// About page markdown file
    pub about_path: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// A site with an explicit configuration, ignoring `_config.yml`
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let output_dir = base_dir.join(&config.output_dir);
        let about_path = base_dir.join(&config.about_file);

        Self {
            config,
            base_dir,
            content_dir,
            output_dir,
            about_path,
        }
    }

    /// Load every post into a directory
    pub fn load_directory(&self) -> Result<PostDirectory, ContentError> {
        ContentLoader::new(self).load_posts().map(PostDirectory::new)
    }

    /// Load the about page document
    pub fn load_about(&self) -> Result<About, ContentError> {
        ContentLoader::new(self).load_about()
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Run every static export
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove generated artifacts
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::run(self, title, slug)
    }
}
