//! Post and About models

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Unique, URL-safe identifier used in `/blog/:slug`
    pub slug: String,

    /// Post title (defaults to the slug)
    pub title: String,

    /// Publication date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Summary used for listings, feeds and meta tags
    pub description: String,

    /// Post tags, case preserved
    pub tags: Vec<String>,

    /// Post language as written in front-matter
    pub language: String,

    /// Listing icon name
    pub icon: Option<String>,

    /// Raw markdown body
    pub content: String,

    /// Estimated reading time in whole minutes, at least 1
    pub read_time_minutes: u32,

    /// File name the post was loaded from
    pub source: String,
}

impl Post {
    /// Publication date in `YYYY-MM-DD` form
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Publication date in RFC 2822 form, at midnight UTC
    pub fn pub_date_rfc2822(&self) -> String {
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    /// Human-readable date, e.g. "January 15, 2024"
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Site path of the post page
    pub fn path(&self) -> String {
        format!("/blog/{}", crate::helpers::encode_component(&self.slug))
    }

    /// Whether any tag matches `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// The about page document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct About {
    pub title: String,
    pub description: String,
    /// Raw markdown body
    pub content: String,
}

#[cfg(test)]
pub(crate) fn sample_post(slug: &str, date: &str, tags: &[&str]) -> Post {
    Post {
        slug: slug.to_string(),
        title: slug.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        language: "EN".to_string(),
        icon: None,
        content: String::new(),
        read_time_minutes: 1,
        source: format!("{}.md", slug),
    }
}
