//! Head metadata written into a copy of the application shell (`index.html`)

use regex::Regex;

use super::{HeadElement, HeadTags, MetaSink};
use crate::helpers::escape_html;

const HEAD_START: &str = "<!-- folio:head -->";
const HEAD_END: &str = "<!-- /folio:head -->";
const BODY_START: &str = "<!-- folio:body -->";
const BODY_END: &str = "<!-- /folio:body -->";

/// An application shell document whose head can be rewritten per route.
///
/// Managed tags live between marker comments, so applying tags again
/// replaces the block instead of appending to it.
#[derive(Debug, Clone)]
pub struct ShellDocument {
    html: String,
    default_title: String,
}

impl ShellDocument {
    pub fn new(html: impl Into<String>, default_title: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            default_title: default_title.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    /// Put a `<noscript>` rendering of the page content at the end of `<body>`
    pub fn set_fallback_body(&mut self, content_html: &str) {
        remove_block(&mut self.html, BODY_START, BODY_END);
        let block = format!(
            "{}<noscript>{}</noscript>{}\n",
            BODY_START, content_html, BODY_END
        );
        insert_before(&mut self.html, "</body>", &block);
    }

    fn set_title(&mut self, title: &str) {
        let escaped = escape_html(title);
        if let (Some(open), Some(close)) = (self.html.find("<title"), self.html.find("</title>")) {
            if let Some(gt) = self.html[open..].find('>').map(|i| open + i + 1) {
                if gt <= close {
                    self.html.replace_range(gt..close, &escaped);
                    return;
                }
            }
        }
        insert_before(
            &mut self.html,
            "</head>",
            &format!("<title>{}</title>\n", escaped),
        );
    }

    /// Drop shell tags that a managed element is about to provide
    fn remove_unmanaged_duplicates(&mut self, tags: &HeadTags) {
        for element in &tags.elements {
            let pattern = match element {
                HeadElement::Meta { attr, key, .. } => format!(
                    r#"<meta\s+{}="{}"[^>]*>\s*"#,
                    attr.as_str(),
                    regex::escape(key)
                ),
                HeadElement::Link { rel, .. } => {
                    format!(r#"<link\s+rel="{}"[^>]*>\s*"#, regex::escape(rel))
                }
                HeadElement::JsonLd(_) => continue,
            };
            if let Ok(re) = Regex::new(&pattern) {
                self.html = re.replace_all(&self.html, "").into_owned();
            }
        }
    }
}

impl MetaSink for ShellDocument {
    fn set(&mut self, tags: &HeadTags) {
        remove_block(&mut self.html, HEAD_START, HEAD_END);
        self.remove_unmanaged_duplicates(tags);
        self.set_title(&tags.title);

        let mut block = String::from(HEAD_START);
        block.push('\n');
        for element in &tags.elements {
            block.push_str(&element.to_html());
            block.push('\n');
        }
        block.push_str(HEAD_END);
        block.push('\n');
        insert_before(&mut self.html, "</head>", &block);
    }

    fn clear(&mut self) {
        remove_block(&mut self.html, HEAD_START, HEAD_END);
        remove_block(&mut self.html, BODY_START, BODY_END);
        let title = self.default_title.clone();
        self.set_title(&title);
    }
}

/// Remove a marker-delimited block, including its trailing newline
fn remove_block(html: &mut String, start: &str, end: &str) {
    if let Some(from) = html.find(start) {
        if let Some(to) = html[from..].find(end).map(|i| from + i + end.len()) {
            let to = if html[to..].starts_with('\n') {
                to + 1
            } else {
                to
            };
            html.replace_range(from..to, "");
        }
    }
}

/// Insert `fragment` before the closing `tag`, or append when it is missing
fn insert_before(html: &mut String, tag: &str, fragment: &str) {
    match html.rfind(tag) {
        Some(pos) => html.insert_str(pos, fragment),
        None => html.push_str(fragment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::meta::PageMeta;

    const SHELL: &str = "<!doctype html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"description\" content=\"Default\">\n<title>vitor.run</title>\n</head>\n<body>\n<div id=\"root\"></div>\n</body>\n</html>\n";

    fn tags(title: &str) -> HeadTags {
        HeadTags::build(
            &SiteConfig::default(),
            &PageMeta::new(title).description("Desc").canonical("/blog"),
        )
    }

    #[test]
    fn test_set_rewrites_title_and_inserts_block() {
        let mut shell = ShellDocument::new(SHELL, "vitor.run");
        shell.set(&tags("Blog"));
        let html = shell.as_str();

        assert!(html.contains("<title>Blog | vitor.run</title>"));
        assert_eq!(html.matches("<title>").count(), 1);
        assert!(html.contains(r#"<link rel="canonical" href="https://vitor.run/blog">"#));
        assert!(!html.contains("content=\"Default\""));
        assert_eq!(html.matches(r#"<meta name="description""#).count(), 1);
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.find(HEAD_END).unwrap() < html.find("</head>").unwrap());
    }

    #[test]
    fn test_set_is_idempotent_and_replaces() {
        let mut shell = ShellDocument::new(SHELL, "vitor.run");
        shell.set(&tags("Blog"));
        let once = shell.as_str().to_string();
        shell.set(&tags("Blog"));
        assert_eq!(shell.as_str(), once);

        shell.set(&tags("About"));
        assert!(shell.as_str().contains("<title>About | vitor.run</title>"));
        assert_eq!(shell.as_str().matches(HEAD_START).count(), 1);
        assert!(!shell.as_str().contains("Blog | vitor.run"));
    }

    #[test]
    fn test_clear_restores_shell_title() {
        let mut shell = ShellDocument::new(SHELL, "vitor.run");
        shell.set(&tags("Blog"));
        shell.set_fallback_body("<p>Hi</p>");
        shell.clear();
        let html = shell.into_string();
        assert!(html.contains("<title>vitor.run</title>"));
        assert!(!html.contains(HEAD_START));
        assert!(!html.contains("<noscript>"));
    }

    #[test]
    fn test_fallback_body_replaced_not_appended() {
        let mut shell = ShellDocument::new(SHELL, "vitor.run");
        shell.set_fallback_body("<p>One</p>");
        shell.set_fallback_body("<p>Two</p>");
        let html = shell.as_str();
        assert_eq!(html.matches("<noscript>").count(), 1);
        assert!(html.contains("<noscript><p>Two</p></noscript>"));
        assert!(html.find("<noscript>").unwrap() < html.find("</body>").unwrap());
    }

    #[test]
    fn test_shell_without_title() {
        let mut shell = ShellDocument::new("<html><head></head><body></body></html>", "x");
        shell.set(&tags("Blog"));
        assert!(shell.as_str().contains("<title>Blog | vitor.run</title>\n"));
    }
}
