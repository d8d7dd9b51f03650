//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that overrides the configured site URL
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub name: String,
    pub author: String,
    pub description: String,
    pub locale: String,
    pub language: String,
    /// Avatar or social card image, absolute or site-relative
    pub image: Option<String>,
    /// Profile links for structured data
    pub same_as: Vec<String>,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub output_dir: String,
    pub about_file: String,

    // Exports
    pub static_routes: Vec<StaticRoute>,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub prerender: PrerenderConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "vitor.run".to_string(),
            author: "Vitor Hugo Salgado".to_string(),
            description: String::new(),
            locale: "en_US".to_string(),
            language: "en".to_string(),
            image: None,
            same_as: Vec::new(),

            url: "https://vitor.run".to_string(),

            content_dir: "blog".to_string(),
            output_dir: "dist".to_string(),
            about_file: "content/about.md".to_string(),

            static_routes: StaticRoute::defaults(),
            feed: FeedConfig::default(),
            prerender: PrerenderConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Apply the `SITE_URL` environment override, if set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SITE_URL_ENV) {
            self.apply_url_override(&url);
        }
    }

    fn apply_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            tracing::debug!("Site URL overridden by {}: {}", SITE_URL_ENV, url);
            self.url = url.to_string();
        }
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL for a site path
    pub fn absolute_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url().to_string()
        } else {
            format!("{}/{}", self.base_url(), path)
        }
    }
}

/// A route that exists regardless of content, e.g. `/about`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRoute {
    /// Site path without leading slash; empty for the home page
    pub path: String,
    pub changefreq: String,
    pub priority: String,
}

impl StaticRoute {
    fn new(path: &str, changefreq: &str, priority: &str) -> Self {
        Self {
            path: path.to_string(),
            changefreq: changefreq.to_string(),
            priority: priority.to_string(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::new("", "weekly", "1.0"),
            Self::new("about", "monthly", "0.9"),
            Self::new("blog", "weekly", "0.9"),
            Self::new("contact", "monthly", "0.8"),
        ]
    }

    /// Site path with leading slash
    pub fn site_path(&self) -> String {
        format!("/{}", self.path.trim_matches('/'))
    }
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Appended to the site name for the channel title
    pub title_suffix: String,
    /// Channel description; defaults to "Blog posts from {name}"
    pub description: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title_suffix: " Blog".to_string(),
            description: None,
        }
    }
}

/// Pre-rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrerenderConfig {
    /// Write per-route head metadata into the copied shell documents
    pub inject_meta: bool,
}
