//! Client route surface and the views each route resolves to

use percent_encoding::percent_decode_str;

use crate::content::{About, Post, PostDirectory};
use crate::helpers::{encode_component, tag_path};
use crate::meta::{Breadcrumb, PageMeta};

/// A client-side route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// `/blog`, optionally narrowed with `?tag=`
    Blog { tag: Option<String> },
    /// `/blog/:slug`
    Post(String),
    /// `/tags/:tag`
    Tag(String),
    About,
    Contact,
    /// Anything else, with the path as requested
    NotFound(String),
}

impl Route {
    /// Match a request path, query string included
    pub fn parse(url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["blog"] => Route::Blog {
                tag: query
                    .and_then(|q| query_param(q, "tag"))
                    .filter(|t| !t.trim().is_empty()),
            },
            ["blog", slug] => Route::Post(decode(slug)),
            ["tags", tag] => Route::Tag(decode(tag)),
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            _ => Route::NotFound(url.to_string()),
        }
    }

    /// Site path of the route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog { tag: None } => "/blog".to_string(),
            Route::Blog { tag: Some(tag) } => format!("/blog?tag={}", encode_component(tag)),
            Route::Post(slug) => format!("/blog/{}", encode_component(slug)),
            Route::Tag(tag) => format!("/tags/{}", encode_component(tag)),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Resolve against the loaded posts
    pub fn resolve<'a>(&self, directory: &'a PostDirectory) -> View<'a> {
        match self {
            Route::Home => View::Home,
            Route::Blog { tag } => View::Blog {
                tag: tag.clone(),
                posts: match tag {
                    Some(tag) => directory.filter_by_tag(tag),
                    None => directory.list_all().iter().collect(),
                },
            },
            Route::Post(slug) => match directory.find_by_slug(slug) {
                Some(post) => View::Post {
                    post,
                    newer: directory.newer(post),
                    older: directory.older(post),
                },
                None => View::PostNotFound { slug: slug.clone() },
            },
            Route::Tag(tag) => View::Tag {
                tag: tag.to_lowercase(),
                posts: directory.filter_by_tag(tag),
            },
            Route::About => View::About,
            Route::Contact => View::Contact,
            Route::NotFound(path) => View::NotFound { path: path.clone() },
        }
    }
}

/// What a route renders
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Home,
    Blog {
        tag: Option<String>,
        posts: Vec<&'a Post>,
    },
    Post {
        post: &'a Post,
        newer: Option<&'a Post>,
        older: Option<&'a Post>,
    },
    PostNotFound {
        slug: String,
    },
    /// Posts under a tag; an unknown tag lists nothing
    Tag {
        tag: String,
        posts: Vec<&'a Post>,
    },
    About,
    Contact,
    NotFound {
        path: String,
    },
}

/// Message and way out of a not-found view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFoundNotice {
    pub message: &'static str,
    pub link_label: &'static str,
    pub link_path: &'static str,
}

impl<'a> View<'a> {
    pub fn is_not_found(&self) -> bool {
        self.not_found().is_some()
    }

    pub fn not_found(&self) -> Option<NotFoundNotice> {
        match self {
            View::PostNotFound { .. } => Some(NotFoundNotice {
                message: "Post not found.",
                link_label: "Back to Blog",
                link_path: "/blog",
            }),
            View::NotFound { .. } => Some(NotFoundNotice {
                message: "This page doesn't exist or has been moved.",
                link_label: "Back to home",
                link_path: "/",
            }),
            _ => None,
        }
    }

    /// Head metadata of the view. `about` supplies the about page's title and
    /// description.
    pub fn page_meta(&self, about: Option<&About>) -> PageMeta {
        let home = Breadcrumb::new("Home", "/");
        match self {
            View::Home => PageMeta::new("Home")
                .description("Personal site and blog.")
                .page_path("/"),
            View::Blog { tag: None, .. } => PageMeta::new("Blog")
                .description("Blog posts and updates.")
                .canonical("/blog")
                .breadcrumbs(vec![home, Breadcrumb::new("Blog", "/blog")]),
            View::Blog { tag: Some(tag), .. } => PageMeta::new("Blog")
                .description("Blog posts and updates.")
                .canonical(tag_path(tag))
                .keywords(vec![tag.to_lowercase()]),
            View::Post { post, .. } => PageMeta::for_post(post),
            View::PostNotFound { slug } => PageMeta::new("Post not found")
                .description("Post not found.")
                .page_path(Route::Post(slug.clone()).path()),
            View::Tag { tag, .. } => {
                let path = tag_path(tag);
                PageMeta::new(format!("Posts tagged \"{}\"", tag))
                    .description(format!("Blog posts tagged {}.", tag))
                    .canonical(path.clone())
                    .keywords(vec![tag.clone()])
                    .breadcrumbs(vec![
                        home,
                        Breadcrumb::new("Blog", "/blog"),
                        Breadcrumb::new(tag.clone(), path),
                    ])
            }
            View::About => {
                let (title, description) = match about {
                    Some(about) => (about.title.as_str(), about.description.as_str()),
                    None => ("About", ""),
                };
                PageMeta::new(title)
                    .description(description)
                    .canonical("/about")
            }
            View::Contact => PageMeta::new("Contact")
                .description("Get in touch.")
                .canonical("/contact"),
            View::NotFound { path } => PageMeta::new("Page not found")
                .description("The page you're looking for doesn't exist.")
                .page_path(path.split('?').next().unwrap_or_default()),
        }
    }
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// First value of `key` in a query string, form-decoded
fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (decode(&k.replace('+', " ")) == key).then(|| decode(&v.replace('+', " ")))
    })
}
