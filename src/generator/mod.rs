//! Generator module - writes the static export artifacts into the output
//! directory: `sitemap.xml`, `rss.xml` and the route folders

mod rss;
mod sitemap;
mod static_paths;

pub use rss::{render_rss, RSS_FILE};
pub use sitemap::{render_sitemap, url_count, SITEMAP_FILE};
pub use static_paths::{route_pages, routable_tags, Prerenderer, RoutePage, SHELL_FILE};

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{About, ContentError, PostDirectory};
use crate::Site;

/// Static export generator.
///
/// Every export re-reads the content directory, so each one can run on its
/// own; running one twice writes the same bytes.
pub struct Generator {
    site: Site,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Self {
        Self { site: site.clone() }
    }

    /// Run sitemap, feed and route folder exports in sequence
    pub fn build(&self) -> Result<()> {
        self.sitemap()?;
        self.rss()?;
        self.static_paths()?;
        Ok(())
    }

    /// Write `sitemap.xml`
    pub fn sitemap(&self) -> Result<PathBuf> {
        let directory = self.load_directory()?;
        let xml = render_sitemap(&self.site.config, &directory);
        let path = self.write_artifact(SITEMAP_FILE, &xml)?;
        tracing::info!(
            "Wrote {:?} ({} URLs)",
            path,
            url_count(&self.site.config, &directory)
        );
        Ok(path)
    }

    /// Write `rss.xml`
    pub fn rss(&self) -> Result<PathBuf> {
        let directory = self.load_directory()?;
        let xml = render_rss(&self.site.config, &directory);
        let path = self.write_artifact(RSS_FILE, &xml)?;
        tracing::info!("Wrote {:?} ({} items)", path, directory.len());
        Ok(path)
    }

    /// Copy the shell document into a folder per client route.
    ///
    /// Fails when the output directory has no shell document yet.
    pub fn static_paths(&self) -> Result<Vec<PathBuf>> {
        let shell_path = self.site.output_dir.join(SHELL_FILE);
        if !shell_path.exists() {
            bail!(
                "{:?} not found. Build the application shell first.",
                shell_path
            );
        }
        let shell = fs::read_to_string(&shell_path)
            .with_context(|| format!("Failed to read shell document: {:?}", shell_path))?;

        let directory = self.load_directory()?;
        let pages = route_pages(&self.site.config, &directory);

        let inject_meta = self.site.config.prerender.inject_meta;
        let about = if inject_meta { self.load_about()? } else { None };
        let prerenderer = Prerenderer::new(&self.site.config, &directory, about.as_ref());

        let mut written = Vec::with_capacity(pages.len());
        for page in &pages {
            let dir = self.site.output_dir.join(&page.dir);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;
            let path = dir.join(SHELL_FILE);
            if is_same_file(&shell_path, &path) {
                bail!("Route folder {:?} would overwrite the shell document", page.dir);
            }

            if inject_meta {
                let html = prerenderer.render(&shell, &page.route);
                fs::write(&path, html)
                    .with_context(|| format!("Failed to write {:?}", path))?;
            } else {
                fs::copy(&shell_path, &path)
                    .with_context(|| format!("Failed to copy shell to {:?}", path))?;
            }
            tracing::debug!("Wrote {:?}", path);
            written.push(path);
        }

        tracing::info!("Created {} route folders", written.len());
        Ok(written)
    }

    fn load_directory(&self) -> Result<PostDirectory> {
        self.site
            .load_directory()
            .with_context(|| format!("Failed to load posts from {:?}", self.site.content_dir))
    }

    /// The about document; a missing file only drops its fallback body
    fn load_about(&self) -> Result<Option<About>> {
        match self.site.load_about() {
            Ok(about) => Ok(Some(about)),
            Err(ContentError::Io(path, _)) => {
                tracing::warn!("About page {:?} not readable, using defaults", path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_artifact(&self, name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.site.output_dir).with_context(|| {
            format!("Failed to create output directory: {:?}", self.site.output_dir)
        })?;
        let path = self.site.output_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }
}

/// Whether two paths name the same existing file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    const SHELL: &str = "<!doctype html>\n<html>\n<head>\n<title>vitor.run</title>\n</head>\n<body>\n<div id=\"root\"></div>\n</body>\n</html>\n";

    fn write_post(dir: &TempDir, file: &str, slug: &str, date: &str, tags: &str) {
        let posts = dir.path().join("blog");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join(file),
            format!(
                "---\nslug: {}\ntitle: {}\ndate: {}\nlanguage: EN\ntags: {}\n---\n\nBody of {}.\n",
                slug, slug, date, tags, slug
            ),
        )
        .unwrap();
    }

    fn site(dir: &TempDir, config: SiteConfig) -> Site {
        Site::with_config(dir.path(), config)
    }

    fn sample_site(dir: &TempDir) -> Site {
        write_post(dir, "2024-01-15-hello.md", "hello", "2024-01-15", "[Rust]");
        write_post(dir, "2024-06-01-lisbon.md", "lisbon", "2024-06-01", "[Travel, rust]");
        site(dir, SiteConfig::default())
    }

    #[test]
    fn test_exports_are_idempotent() {
        let dir = TempDir::new().unwrap();
        let site = sample_site(&dir);
        let generator = Generator::new(&site);

        let sitemap = generator.sitemap().unwrap();
        let rss = generator.rss().unwrap();
        let first = (
            fs::read_to_string(&sitemap).unwrap(),
            fs::read_to_string(&rss).unwrap(),
        );
        generator.sitemap().unwrap();
        generator.rss().unwrap();
        assert_eq!(fs::read_to_string(&sitemap).unwrap(), first.0);
        assert_eq!(fs::read_to_string(&rss).unwrap(), first.1);

        assert!(first.0.contains("<loc>https://vitor.run/blog/lisbon</loc>"));
        assert!(first.0.contains("<loc>https://vitor.run/tags/travel</loc>"));
        assert!(first.1.find("/blog/lisbon").unwrap() < first.1.find("/blog/hello").unwrap());
    }

    #[test]
    fn test_static_paths_need_shell() {
        let dir = TempDir::new().unwrap();
        let site = sample_site(&dir);
        let err = Generator::new(&site).static_paths().unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(!site.output_dir.join("about").exists());
    }

    #[test]
    fn test_static_paths_copy_shell() {
        let dir = TempDir::new().unwrap();
        let site = sample_site(&dir);
        fs::create_dir_all(&site.output_dir).unwrap();
        fs::write(site.output_dir.join(SHELL_FILE), SHELL).unwrap();

        let written = Generator::new(&site).static_paths().unwrap();
        assert_eq!(written.len(), 7);
        for route in ["about", "blog", "contact", "blog/hello", "blog/lisbon", "tags/rust", "tags/travel"] {
            let html = fs::read_to_string(site.output_dir.join(route).join(SHELL_FILE)).unwrap();
            assert_eq!(html, SHELL);
        }

        // Rerun overwrites in place
        assert_eq!(Generator::new(&site).static_paths().unwrap(), written);
    }

    #[test]
    fn test_static_paths_inject_meta() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.prerender.inject_meta = true;
        write_post(&dir, "hello.md", "hello", "2024-01-15", "[]");
        let site = site(&dir, config);
        fs::create_dir_all(&site.output_dir).unwrap();
        fs::write(site.output_dir.join(SHELL_FILE), SHELL).unwrap();

        let generator = Generator::new(&site);
        generator.static_paths().unwrap();
        let post = fs::read_to_string(site.output_dir.join("blog/hello").join(SHELL_FILE)).unwrap();
        assert!(post.contains("<title>hello | vitor.run</title>"));
        assert!(post.contains("<noscript><article><h1>hello</h1>"));

        // About falls back to defaults without an about file
        let about = fs::read_to_string(site.output_dir.join("about").join(SHELL_FILE)).unwrap();
        assert!(about.contains("<title>About | vitor.run</title>"));

        generator.static_paths().unwrap();
        let again = fs::read_to_string(site.output_dir.join("blog/hello").join(SHELL_FILE)).unwrap();
        assert_eq!(again, post);
        // The shell itself stays untouched
        assert_eq!(fs::read_to_string(site.output_dir.join(SHELL_FILE)).unwrap(), SHELL);
    }

    #[test]
    fn test_dot_slug_keeps_shell_intact() {
        let dir = TempDir::new().unwrap();
        let site = sample_site(&dir);
        fs::write(
            dir.path().join("blog").join("dots.md"),
            "---\nslug: \"..\"\ndate: 2024-02-01\nlanguage: EN\n---\nBody.\n",
        )
        .unwrap();
        fs::create_dir_all(&site.output_dir).unwrap();
        fs::write(site.output_dir.join(SHELL_FILE), SHELL).unwrap();

        let err = Generator::new(&site).static_paths().unwrap_err();
        assert!(format!("{:#}", err).contains("dots.md"));
        assert_eq!(fs::read_to_string(site.output_dir.join(SHELL_FILE)).unwrap(), SHELL);
    }

    #[test]
    fn test_shell_is_never_copied_onto_itself() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.static_routes[1].path = ".".to_string();
        let site = site(&dir, config);
        fs::create_dir_all(&site.output_dir).unwrap();
        fs::write(site.output_dir.join(SHELL_FILE), SHELL).unwrap();

        assert!(Generator::new(&site).static_paths().is_err());
        assert_eq!(fs::read_to_string(site.output_dir.join(SHELL_FILE)).unwrap(), SHELL);
    }

    #[test]
    fn test_invalid_content_fails_every_export() {
        let dir = TempDir::new().unwrap();
        let site = sample_site(&dir);
        fs::write(
            dir.path().join("blog").join("broken.md"),
            "---\nslug: broken\nlanguage: EN\n---\nNo date.\n",
        )
        .unwrap();
        fs::create_dir_all(&site.output_dir).unwrap();
        fs::write(site.output_dir.join(SHELL_FILE), SHELL).unwrap();

        let generator = Generator::new(&site);
        assert!(generator.sitemap().is_err());
        assert!(generator.rss().is_err());
        assert!(generator.static_paths().is_err());
        assert!(generator.build().is_err());
    }
}
