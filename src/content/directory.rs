//! In-memory post directory: listing, tag filtering, tag index and lookup

use std::collections::{BTreeMap, BTreeSet};

use super::Post;

/// Immutable collection of loaded posts, in loader order (newest first)
#[derive(Debug, Clone, Default)]
pub struct PostDirectory {
    posts: Vec<Post>,
}

impl PostDirectory {
    /// Wrap posts produced by the content loader
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// All posts, newest first
    pub fn list_all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts carrying `tag`, compared case-insensitively. Empty when none match.
    pub fn filter_by_tag(&self, tag: &str) -> Vec<&Post> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Vec::new();
        }
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// Distinct tags across all posts, lowercased and sorted
    pub fn all_tags(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter())
            .map(|t| t.to_lowercase())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of posts per lowercased tag
    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for post in &self.posts {
            // A post listing the same tag twice counts once
            let tags: BTreeSet<_> = post.tags.iter().map(|t| t.to_lowercase()).collect();
            for tag in tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Post with exactly this slug. Blank slugs never match.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        if slug.trim().is_empty() {
            return None;
        }
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// The post published right after `post`
    pub fn newer(&self, post: &Post) -> Option<&Post> {
        let pos = self.position(post)?;
        pos.checked_sub(1).and_then(|i| self.posts.get(i))
    }

    /// The post published right before `post`
    pub fn older(&self, post: &Post) -> Option<&Post> {
        let pos = self.position(post)?;
        self.posts.get(pos + 1)
    }

    fn position(&self, post: &Post) -> Option<usize> {
        self.posts.iter().position(|p| p.slug == post.slug)
    }
}

impl From<Vec<Post>> for PostDirectory {
    fn from(posts: Vec<Post>) -> Self {
        Self::new(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::sample_post;

    fn directory() -> PostDirectory {
        PostDirectory::new(vec![
            sample_post("lisbon", "2024-06-01", &["Travel", "Food"]),
            sample_post("rust-notes", "2024-03-01", &["rust", "travel"]),
            sample_post("hello", "2023-01-01", &[]),
        ])
    }

    #[test]
    fn test_list_all_keeps_loader_order() {
        let dir = directory();
        let slugs: Vec<_> = dir.list_all().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["lisbon", "rust-notes", "hello"]);
        assert_eq!(dir.len(), 3);
        assert!(!dir.is_empty());
    }

    #[test]
    fn test_filter_by_tag_is_case_insensitive() {
        let dir = directory();
        let upper: Vec<_> = dir
            .filter_by_tag("Travel")
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        let lower: Vec<_> = dir
            .filter_by_tag("travel")
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(upper, lower);
        assert_eq!(upper, vec!["lisbon", "rust-notes"]);
    }

    #[test]
    fn test_filter_by_unknown_tag_is_empty() {
        let dir = directory();
        assert!(dir.filter_by_tag("gardening").is_empty());
        assert!(dir.filter_by_tag("").is_empty());
    }

    #[test]
    fn test_all_tags_dedup_and_sorted() {
        let dir = directory();
        assert_eq!(dir.all_tags(), vec!["food", "rust", "travel"]);
        assert!(PostDirectory::default().all_tags().is_empty());
    }

    #[test]
    fn test_tag_counts() {
        let mut posts = directory().list_all().to_vec();
        posts.push(sample_post("dup", "2022-01-01", &["Rust", "rust"]));
        let counts = PostDirectory::from(posts).tag_counts();
        assert_eq!(counts.get("travel"), Some(&2));
        assert_eq!(counts.get("rust"), Some(&2));
        assert_eq!(counts.get("food"), Some(&1));
    }

    #[test]
    fn test_find_by_slug() {
        let dir = directory();
        assert_eq!(dir.find_by_slug("hello").map(|p| p.slug.as_str()), Some("hello"));
        assert!(dir.find_by_slug("nonexistent").is_none());
        assert!(dir.find_by_slug("").is_none());
        assert!(dir.find_by_slug("  ").is_none());
    }

    #[test]
    fn test_newer_and_older() {
        let dir = directory();
        let middle = dir.find_by_slug("rust-notes").unwrap();
        assert_eq!(dir.newer(middle).map(|p| p.slug.as_str()), Some("lisbon"));
        assert_eq!(dir.older(middle).map(|p| p.slug.as_str()), Some("hello"));

        let newest = dir.find_by_slug("lisbon").unwrap();
        assert!(dir.newer(newest).is_none());
        let oldest = dir.find_by_slug("hello").unwrap();
        assert!(dir.older(oldest).is_none());
    }
}
