//! Page metadata sinks

use super::{HeadElement, HeadTags, MetaAttr};

/// Destination for a page's head tags.
///
/// `set` replaces every tag applied by the previous call; `clear` removes
/// them and restores the default title.
pub trait MetaSink {
    fn set(&mut self, tags: &HeadTags);
    fn clear(&mut self);
}

/// In-memory document head holding the currently applied page tags
#[derive(Debug, Clone)]
pub struct HeadDocument {
    default_title: String,
    title: String,
    elements: Vec<HeadElement>,
}

impl HeadDocument {
    /// An empty head titled with the site name
    pub fn new(default_title: impl Into<String>) -> Self {
        let default_title = default_title.into();
        Self {
            title: default_title.clone(),
            default_title,
            elements: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn elements(&self) -> &[HeadElement] {
        &self.elements
    }

    /// Content of every `<meta>` with this name or property
    pub fn meta(&self, key: &str) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                HeadElement::Meta { key: k, content, .. } if k == key => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// `<meta name=...>` lookup, first match only
    pub fn meta_name(&self, name: &str) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Meta {
                attr: MetaAttr::Name,
                key,
                content,
            } if key == name => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn canonical(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Link { rel, href } if rel == "canonical" => Some(href.as_str()),
            _ => None,
        })
    }

    /// Render the head as HTML
    pub fn to_html(&self) -> String {
        HeadTags {
            title: self.title.clone(),
            elements: self.elements.clone(),
        }
        .to_html()
    }
}

impl MetaSink for HeadDocument {
    fn set(&mut self, tags: &HeadTags) {
        self.title = tags.title.clone();
        self.elements = tags.elements.clone();
    }

    fn clear(&mut self) {
        self.title = self.default_title.clone();
        self.elements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::post::sample_post;
    use crate::meta::PageMeta;

    #[test]
    fn test_navigation_replaces_tags() {
        let config = SiteConfig::default();
        let mut head = HeadDocument::new(&config.name);

        let post = sample_post("hello", "2024-01-15", &["rust"]);
        head.set(&HeadTags::build(&config, &PageMeta::for_post(&post)));
        assert_eq!(head.meta_name("keywords"), Some("rust"));
        assert_eq!(head.meta("article:tag"), vec!["rust"]);
        assert!(head.canonical().is_some());
        let count = head.elements().len();

        // Same page again does not accumulate
        head.set(&HeadTags::build(&config, &PageMeta::for_post(&post)));
        assert_eq!(head.elements().len(), count);

        // A page without keywords or canonical path drops both
        head.set(&HeadTags::build(&config, &PageMeta::new("Page not found")));
        assert_eq!(head.title(), "Page not found | vitor.run");
        assert_eq!(head.meta_name("keywords"), None);
        assert!(head.meta("article:tag").is_empty());
        assert_eq!(head.canonical(), None);
        assert_eq!(head.meta("og:title").len(), 1);
    }

    #[test]
    fn test_clear_restores_default_title() {
        let config = SiteConfig::default();
        let mut head = HeadDocument::new("vitor.run");
        head.set(&HeadTags::build(&config, &PageMeta::new("Blog")));
        head.clear();
        assert_eq!(head.title(), "vitor.run");
        assert!(head.elements().is_empty());
        assert_eq!(head.to_html(), "<title>vitor.run</title>\n");
    }
}
