//! Create a new post

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Title used when none is given
pub const DEFAULT_TITLE: &str = "Post";

/// Create a post dated `date` in the content directory.
///
/// The slug and file name are `YYYY-MM-DD-<slug>`, where `<slug>` is the
/// slugified title unless given explicitly.
pub fn create_post(site: &Site, title: &str, slug: Option<&str>, date: NaiveDate) -> Result<PathBuf> {
    let title = match title.trim() {
        "" => DEFAULT_TITLE,
        t => t,
    };
    let date_str = date.format("%Y-%m-%d").to_string();
    let slug = match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => slug::slugify(s),
        None => format!("{}-{}", date_str, slug::slugify(title)),
    };

    fs::create_dir_all(&site.content_dir)
        .with_context(|| format!("Failed to create {:?}", site.content_dir))?;
    let file_path = site.content_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {}
slug: {}
date: {}
description: ""
language: {}
tags: []
---

Write your content here.
"#,
        yaml_string(title),
        slug,
        date_str,
        site.config.language.to_uppercase()
    );

    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Run the new command with today's date
pub fn run(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    create_post(site, title, slug, chrono::Local::now().date_naive())
}

/// Quote a scalar so titles with `:` or `#` stay valid YAML
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::loader::load_posts_from_dir;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_default_post_loads() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let path = create_post(&site, "", None, date()).unwrap();
        assert!(path.ends_with("blog/2024-03-09-post.md"));

        let posts = load_posts_from_dir(&site.content_dir).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "2024-03-09-post");
        assert_eq!(posts[0].title, "Post");
        assert_eq!(posts[0].language, "EN");
        assert!(posts[0].tags.is_empty());
    }

    #[test]
    fn test_title_and_slug() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let path = create_post(&site, "Rust: \"first\" steps", None, date()).unwrap();
        assert!(path.ends_with("2024-03-09-rust-first-steps.md"));
        let path = create_post(&site, "Other", Some("My Slug"), date()).unwrap();
        assert!(path.ends_with("my-slug.md"));

        let posts = load_posts_from_dir(&site.content_dir).unwrap();
        let first = posts.iter().find(|p| p.slug == "2024-03-09-rust-first-steps").unwrap();
        assert_eq!(first.title, "Rust: \"first\" steps");
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        create_post(&site, "", None, date()).unwrap();
        let err = create_post(&site, "", None, date()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
