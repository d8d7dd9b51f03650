//! Content loader - loads posts and the about page from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::read_time::read_time_minutes;
use super::{About, ContentError, FrontMatter, Post};
use crate::Site;

/// Loads content from the configured content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load, validate and order every post
    pub fn load_posts(&self) -> Result<Vec<Post>, ContentError> {
        let posts = load_posts_from_dir(&self.site.content_dir)?;
        tracing::info!(
            "Loaded {} posts from {:?}",
            posts.len(),
            self.site.content_dir
        );
        Ok(posts)
    }

    /// Load the about page document
    pub fn load_about(&self) -> Result<About, ContentError> {
        let path = &self.site.about_path;
        let raw = fs::read_to_string(path).map_err(|e| ContentError::Io(path.clone(), e))?;
        parse_about(&file_name(path), &raw)
    }
}

/// Read every `*.md` file directly inside `dir`, in file-name order
pub fn load_posts_from_dir(dir: &Path) -> Result<Vec<Post>, ContentError> {
    if !dir.exists() {
        tracing::warn!("Content directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ContentError::Io(dir.to_path_buf(), e.into()))?;
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) {
            let raw =
                fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;
            sources.push((file_name(path), raw));
        }
    }

    parse_posts(sources)
}

/// Build ordered posts from `(file name, raw file)` pairs.
///
/// The result is sorted by date, newest first; posts sharing a date keep
/// the order they were given in.
pub fn parse_posts<I, S>(sources: I) -> Result<Vec<Post>, ContentError>
where
    I: IntoIterator<Item = (String, S)>,
    S: AsRef<str>,
{
    let mut posts = Vec::new();
    let mut seen: HashMap<String, String> = HashMap::new();

    for (file, raw) in sources {
        let post = parse_post(&file, raw.as_ref())?;
        if let Some(first) = seen.get(&post.slug) {
            return Err(ContentError::DuplicateSlug {
                slug: post.slug,
                first: first.clone(),
                file,
            });
        }
        seen.insert(post.slug.clone(), file);
        posts.push(post);
    }

    // Stable sort keeps encounter order for equal dates
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(posts)
}

/// Parse and validate a single post
pub fn parse_post(file: &str, raw: &str) -> Result<Post, ContentError> {
    let (fm, body) = FrontMatter::parse(raw).map_err(|source| ContentError::Frontmatter {
        file: file.to_string(),
        source,
    })?;
    post_from_frontmatter(file, fm, body)
}

/// Validate front-matter and apply defaults
pub fn post_from_frontmatter(file: &str, fm: FrontMatter, body: &str) -> Result<Post, ContentError> {
    let missing = |field: &'static str| ContentError::MissingField {
        file: file.to_string(),
        field,
    };

    let slug = FrontMatter::non_empty(&fm.slug)
        .ok_or_else(|| missing("slug"))?
        .to_string();
    if is_dot_segment(&slug) {
        return Err(ContentError::InvalidSlug {
            file: file.to_string(),
            slug,
        });
    }
    let language = FrontMatter::non_empty(&fm.language)
        .ok_or_else(|| missing("language"))?
        .to_string();

    let date_value = fm
        .date
        .as_ref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| missing("date"))?;
    let date = date_value.to_date().ok_or_else(|| ContentError::InvalidDate {
        file: file.to_string(),
        value: date_value.to_string(),
    })?;

    let title = FrontMatter::non_empty(&fm.title)
        .map(str::to_string)
        .unwrap_or_else(|| slug.clone());
    let description = fm
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let tags = fm
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    let icon = FrontMatter::non_empty(&fm.icon).map(str::to_string);

    tracing::debug!("Loaded post {:?} from {}", slug, file);

    Ok(Post {
        slug,
        title,
        date,
        description,
        tags,
        language,
        icon,
        content: body.to_string(),
        read_time_minutes: read_time_minutes(body),
        source: file.to_string(),
    })
}

/// Parse the about page; every field is optional
pub fn parse_about(file: &str, raw: &str) -> Result<About, ContentError> {
    let (fm, body) = FrontMatter::parse(raw).map_err(|source| ContentError::Frontmatter {
        file: file.to_string(),
        source,
    })?;

    Ok(About {
        title: FrontMatter::non_empty(&fm.title)
            .unwrap_or("About")
            .to_string(),
        description: FrontMatter::non_empty(&fm.description)
            .unwrap_or_default()
            .to_string(),
        content: body.to_string(),
    })
}

/// `.` and `..` would name the parent folder once used as a path segment
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
