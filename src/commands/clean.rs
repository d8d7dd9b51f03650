//! Remove generated artifacts from the output directory

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;

use crate::generator::{RSS_FILE, SITEMAP_FILE};
use crate::Site;

/// Delete the sitemap, the feed and the route folders. The shell document
/// and the rest of the output directory are left alone.
pub fn run(site: &Site) -> Result<()> {
    let output_dir = &site.output_dir;
    if !output_dir.exists() {
        return Ok(());
    }

    for file in [SITEMAP_FILE, RSS_FILE] {
        let path = output_dir.join(file);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to delete {:?}", path))?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    let mut dirs: BTreeSet<&str> = site
        .config
        .static_routes
        .iter()
        .map(|r| r.path.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect();
    dirs.insert("blog");
    dirs.insert("tags");

    for dir in dirs {
        let path = output_dir.join(dir);
        if path.is_dir() {
            fs::remove_dir_all(&path).with_context(|| format!("Failed to delete {:?}", path))?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_keeps_shell() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        let out = &site.output_dir;
        fs::create_dir_all(out.join("blog/hello")).unwrap();
        fs::create_dir_all(out.join("tags/rust")).unwrap();
        fs::create_dir_all(out.join("assets")).unwrap();
        fs::write(out.join("index.html"), "<html></html>").unwrap();
        fs::write(out.join(SITEMAP_FILE), "").unwrap();
        fs::write(out.join(RSS_FILE), "").unwrap();

        run(&site).unwrap();

        assert!(out.join("index.html").exists());
        assert!(out.join("assets").exists());
        assert!(!out.join("blog").exists());
        assert!(!out.join("tags").exists());
        assert!(!out.join(SITEMAP_FILE).exists());
        assert!(!out.join(RSS_FILE).exists());

        // Nothing left to clean is fine
        run(&site).unwrap();
    }
}
