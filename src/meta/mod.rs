//! Page metadata for SEO: title, description, canonical link, Open Graph,
//! Twitter cards and JSON-LD structured data.
//!
//! [`HeadTags::build`] turns a page's [`PageMeta`] into the full tag set; a
//! [`MetaSink`] applies it to a head. Applying new tags replaces whatever the
//! previous page set.

mod shell;
mod sink;

pub use shell::ShellDocument;
pub use sink::{HeadDocument, MetaSink};

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{escape_html, escape_script_json, site_path};

/// What a page wants in its head
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    /// Display title; empty means the site name alone
    pub title: String,
    pub description: String,
    /// Path for the canonical link, e.g. `/blog/hello-world`
    pub canonical_path: Option<String>,
    pub keywords: Vec<String>,
    /// Publish metadata, for article pages only
    pub article: Option<ArticleMeta>,
    /// Trail from the home page down to this page
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Path the page was requested at, for `og:url` when there is no
    /// canonical path
    pub page_path: Option<String>,
}

/// One step of a breadcrumb trail
#[derive(Debug, Clone, PartialEq)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Publish metadata of an article page
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleMeta {
    pub published: NaiveDate,
    pub language: String,
    pub tags: Vec<String>,
}

impl PageMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn canonical(mut self, path: impl Into<String>) -> Self {
        self.canonical_path = Some(path.into());
        self
    }

    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn breadcrumbs(mut self, breadcrumbs: Vec<Breadcrumb>) -> Self {
        self.breadcrumbs = breadcrumbs;
        self
    }

    pub fn page_path(mut self, path: impl Into<String>) -> Self {
        self.page_path = Some(path.into());
        self
    }

    /// Metadata of a post page
    pub fn for_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            canonical_path: Some(post.path()),
            keywords: post.tags.clone(),
            article: Some(ArticleMeta {
                published: post.date,
                language: post.language.clone(),
                tags: post.tags.clone(),
            }),
            breadcrumbs: vec![
                Breadcrumb::new("Home", "/"),
                Breadcrumb::new("Blog", "/blog"),
                Breadcrumb::new(post.title.clone(), post.path()),
            ],
            page_path: None,
        }
    }
}

/// Which attribute names a `<meta>` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

/// A single managed head element
#[derive(Debug, Clone, PartialEq)]
pub enum HeadElement {
    Meta {
        attr: MetaAttr,
        key: String,
        content: String,
    },
    Link {
        rel: String,
        href: String,
    },
    JsonLd(Value),
}

impl HeadElement {
    fn meta(attr: MetaAttr, key: &str, content: impl Into<String>) -> Self {
        HeadElement::Meta {
            attr,
            key: key.to_string(),
            content: content.into(),
        }
    }

    /// Render as a single HTML tag
    pub fn to_html(&self) -> String {
        match self {
            HeadElement::Meta { attr, key, content } => format!(
                r#"<meta {}="{}" content="{}">"#,
                attr.as_str(),
                escape_html(key),
                escape_html(content)
            ),
            HeadElement::Link { rel, href } => format!(
                r#"<link rel="{}" href="{}">"#,
                escape_html(rel),
                escape_html(href)
            ),
            HeadElement::JsonLd(value) => format!(
                r#"<script type="application/ld+json">{}</script>"#,
                escape_script_json(&value.to_string())
            ),
        }
    }
}

/// The complete set of head tags for one page
#[derive(Debug, Clone, PartialEq)]
pub struct HeadTags {
    pub title: String,
    pub elements: Vec<HeadElement>,
}

impl HeadTags {
    /// Compute every managed tag for `page`
    pub fn build(config: &SiteConfig, page: &PageMeta) -> Self {
        let title = if page.title.trim().is_empty() {
            config.name.clone()
        } else {
            format!("{} | {}", page.title.trim(), config.name)
        };
        let canonical_url = page
            .canonical_path
            .as_deref()
            .map(|p| config.absolute_url(&site_path(p)));
        let page_url = canonical_url.clone().or_else(|| {
            page.page_path
                .as_deref()
                .map(|p| config.absolute_url(&site_path(p)))
        });
        let image = config.image.as_deref().map(|img| absolute_asset(config, img));

        let mut elements = vec![HeadElement::meta(
            MetaAttr::Name,
            "description",
            page.description.as_str(),
        )];
        if !page.keywords.is_empty() {
            elements.push(HeadElement::meta(
                MetaAttr::Name,
                "keywords",
                page.keywords.join(", "),
            ));
        }
        if let Some(href) = &canonical_url {
            elements.push(HeadElement::Link {
                rel: "canonical".to_string(),
                href: href.clone(),
            });
        }

        let og_type = if page.article.is_some() {
            "article"
        } else {
            "website"
        };
        elements.extend([
            HeadElement::meta(MetaAttr::Property, "og:title", title.as_str()),
            HeadElement::meta(MetaAttr::Property, "og:description", page.description.as_str()),
        ]);
        if let Some(url) = &page_url {
            elements.push(HeadElement::meta(MetaAttr::Property, "og:url", url.as_str()));
        }
        elements.extend([
            HeadElement::meta(MetaAttr::Property, "og:type", og_type),
            HeadElement::meta(MetaAttr::Property, "og:site_name", config.name.as_str()),
            HeadElement::meta(MetaAttr::Property, "og:locale", config.locale.as_str()),
        ]);
        if let Some(image) = &image {
            elements.push(HeadElement::meta(MetaAttr::Property, "og:image", image.as_str()));
        }
        elements.extend([
            HeadElement::meta(MetaAttr::Name, "twitter:card", "summary"),
            HeadElement::meta(MetaAttr::Name, "twitter:title", title.as_str()),
            HeadElement::meta(MetaAttr::Name, "twitter:description", page.description.as_str()),
        ]);

        match &page.article {
            Some(article) => {
                elements.push(HeadElement::meta(
                    MetaAttr::Property,
                    "article:published_time",
                    article.published.format("%Y-%m-%d").to_string(),
                ));
                for tag in &article.tags {
                    elements.push(HeadElement::meta(MetaAttr::Property, "article:tag", tag.as_str()));
                }
                elements.push(HeadElement::JsonLd(blog_posting(
                    config,
                    page,
                    article,
                    page_url.as_deref().unwrap_or(config.base_url()),
                    image.as_deref(),
                )));
            }
            None => {
                elements.push(HeadElement::JsonLd(website(config)));
                elements.push(HeadElement::JsonLd(person(config, image.as_deref())));
            }
        }
        if !page.breadcrumbs.is_empty() {
            elements.push(HeadElement::JsonLd(breadcrumb_list(config, &page.breadcrumbs)));
        }

        Self { title, elements }
    }

    /// Render title and elements, one tag per line
    pub fn to_html(&self) -> String {
        let mut html = format!("<title>{}</title>\n", escape_html(&self.title));
        for element in &self.elements {
            html.push_str(&element.to_html());
            html.push('\n');
        }
        html
    }
}

fn absolute_asset(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        config.absolute_url(path)
    }
}

fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": config.name,
        "url": config.base_url(),
    })
}

fn person(config: &SiteConfig, image: Option<&str>) -> Value {
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": config.author,
        "url": config.base_url(),
    });
    if let Some(image) = image {
        value["image"] = json!(image);
    }
    if !config.same_as.is_empty() {
        value["sameAs"] = json!(config.same_as);
    }
    value
}

fn blog_posting(
    config: &SiteConfig,
    page: &PageMeta,
    article: &ArticleMeta,
    url: &str,
    image: Option<&str>,
) -> Value {
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": page.title,
        "description": page.description,
        "datePublished": article.published.format("%Y-%m-%d").to_string(),
        "inLanguage": article.language,
        "url": url,
        "mainEntityOfPage": url,
        "author": {
            "@type": "Person",
            "name": config.author,
            "url": config.base_url(),
        },
    });
    if !article.tags.is_empty() {
        value["keywords"] = json!(article.tags.join(", "));
    }
    if let Some(image) = image {
        value["image"] = json!(image);
    }
    value
}

fn breadcrumb_list(config: &SiteConfig, breadcrumbs: &[Breadcrumb]) -> Value {
    let items: Vec<Value> = breadcrumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
                "item": config.absolute_url(&site_path(&crumb.path)),
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}
