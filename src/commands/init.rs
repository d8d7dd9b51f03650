//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::{Site, CONFIG_FILE};

const CONFIG: &str = r#"# Site
name: vitor.run
author: Vitor Hugo Salgado
description: Personal site and blog.
locale: en_US
language: en
# image: /avatar.jpg
same_as: []

# URL (the SITE_URL environment variable wins)
url: https://vitor.run

# Directory
content_dir: blog
output_dir: dist
about_file: content/about.md

# Sitemap entries for routes that exist without content
static_routes:
  - path: ""
    changefreq: weekly
    priority: "1.0"
  - path: about
    changefreq: monthly
    priority: "0.9"
  - path: blog
    changefreq: weekly
    priority: "0.9"
  - path: contact
    changefreq: monthly
    priority: "0.8"

# RSS
feed:
  title_suffix: " Blog"

# Route folders
prerender:
  inject_meta: false
"#;

const ABOUT: &str = r#"---
title: About
description: Who I am and what I do.
---

Write a few words about yourself here.
"#;

const SHELL: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>vitor.run</title>
</head>
<body>
<div id="root"></div>
</body>
</html>
"#;

/// Initialize a new site in the given directory. Existing files are kept.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let hello = format!(
        r#"---
title: Hello World
slug: hello-world
date: {}
description: The first post.
language: EN
tags:
  - meta
---

Welcome! This is your very first post.

## Writing posts

Create one with `folio new "My New Post"`, then run `folio build` after
building the application shell into `dist/`.
"#,
        today
    );

    let files = [
        (target_dir.join(CONFIG_FILE), CONFIG.to_string()),
        (target_dir.join("content/about.md"), ABOUT.to_string()),
        (target_dir.join("blog/hello-world.md"), hello),
        (target_dir.join("dist/index.html"), SHELL.to_string()),
    ];

    for (path, content) in files {
        if path.exists() {
            tracing::warn!("Skipping existing file: {:?}", path);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Created: {:?}", path);
    }

    Ok(())
}

/// Run the init command with an existing site
pub fn run(site: &Site) -> Result<()> {
    init_site(&site.base_dir)
}
