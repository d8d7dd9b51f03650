//! Route folders holding a copy of the application shell, so static hosts
//! answer direct navigation to client routes with success

use crate::config::SiteConfig;
use crate::content::loader::is_dot_segment;
use crate::content::{About, MarkdownRenderer, PostDirectory};
use crate::helpers::{encode_component, escape_html};
use crate::meta::{HeadTags, MetaSink, ShellDocument};
use crate::routes::{Route, View};

/// The shell document in the output directory
pub const SHELL_FILE: &str = "index.html";

/// A client route and the output folder it is written to
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePage {
    pub route: Route,
    /// Folder relative to the output directory, e.g. `blog/hello-world`
    pub dir: String,
}

/// Every route that gets a folder: configured static routes other than
/// home, then posts, then tags
pub fn route_pages(config: &SiteConfig, directory: &PostDirectory) -> Vec<RoutePage> {
    let statics = config
        .static_routes
        .iter()
        .map(|r| r.path.trim_matches('/'))
        .filter(|path| !path.is_empty())
        .map(|path| RoutePage {
            route: Route::parse(path),
            dir: path.to_string(),
        });
    let posts = directory.list_all().iter().map(|post| RoutePage {
        route: Route::Post(post.slug.clone()),
        dir: format!("blog/{}", encode_component(&post.slug)),
    });
    let tags = routable_tags(directory).into_iter().map(|tag| RoutePage {
        dir: format!("tags/{}", encode_component(&tag)),
        route: Route::Tag(tag),
    });

    statics.chain(posts).chain(tags).collect()
}

/// Tags that can name a folder; `.` and `..` cannot
pub fn routable_tags(directory: &PostDirectory) -> Vec<String> {
    directory
        .all_tags()
        .into_iter()
        .filter(|tag| {
            let ok = !is_dot_segment(tag);
            if !ok {
                tracing::warn!("Skipping tag {:?}: not a usable path segment", tag);
            }
            ok
        })
        .collect()
}

/// Writes route metadata and a `<noscript>` fallback into shell copies
pub struct Prerenderer<'a> {
    config: &'a SiteConfig,
    directory: &'a PostDirectory,
    about: Option<&'a About>,
    markdown: MarkdownRenderer,
}

impl<'a> Prerenderer<'a> {
    pub fn new(
        config: &'a SiteConfig,
        directory: &'a PostDirectory,
        about: Option<&'a About>,
    ) -> Self {
        Self {
            config,
            directory,
            about,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// The shell as served for `route`. Routes outside the route table get
    /// the shell unchanged.
    pub fn render(&self, shell: &str, route: &Route) -> String {
        let view = route.resolve(self.directory);
        if view.is_not_found() {
            return shell.to_string();
        }

        let mut document = ShellDocument::new(shell, self.config.name.as_str());
        let tags = HeadTags::build(self.config, &view.page_meta(self.about));
        document.set(&tags);

        if let Some(fallback) = self.fallback_body(&view) {
            document.set_fallback_body(&fallback);
        }
        document.into_string()
    }

    fn fallback_body(&self, view: &View<'_>) -> Option<String> {
        match view {
            View::Post { post, .. } => Some(format!(
                "<article><h1>{}</h1><time datetime=\"{}\">{}</time>{}</article>",
                escape_html(&post.title),
                post.date_string(),
                post.display_date(),
                self.markdown.render(&post.content)
            )),
            View::About => self.about.map(|about| {
                format!(
                    "<article><h1>{}</h1>{}</article>",
                    escape_html(&about.title),
                    self.markdown.render(&about.content)
                )
            }),
            _ => None,
        }
    }
}
