//! `sitemap.xml` export

use super::static_paths::routable_tags;
use crate::config::SiteConfig;
use crate::content::PostDirectory;
use crate::helpers::{escape_xml, tag_path};

/// File name of the sitemap in the output directory
pub const SITEMAP_FILE: &str = "sitemap.xml";

struct SitemapUrl {
    path: String,
    changefreq: &'static str,
    priority: &'static str,
    lastmod: Option<String>,
}

/// Render the sitemap: static routes, then posts, then tags
pub fn render_sitemap(config: &SiteConfig, directory: &PostDirectory) -> String {
    let mut sitemap = String::new();
    sitemap.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    sitemap.push('\n');
    sitemap.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    sitemap.push('\n');

    for route in &config.static_routes {
        push_url(
            &mut sitemap,
            config,
            &route.site_path(),
            &route.changefreq,
            &route.priority,
            None,
        );
    }

    let tags = routable_tags(directory);
    let dynamic = directory
        .list_all()
        .iter()
        .map(|post| SitemapUrl {
            path: post.path(),
            changefreq: "monthly",
            priority: "0.7",
            lastmod: Some(post.date_string()),
        })
        .chain(tags.iter().map(|tag| SitemapUrl {
            path: tag_path(tag),
            changefreq: "weekly",
            priority: "0.6",
            lastmod: None,
        }));
    for url in dynamic {
        push_url(
            &mut sitemap,
            config,
            &url.path,
            url.changefreq,
            url.priority,
            url.lastmod.as_deref(),
        );
    }

    sitemap.push_str("</urlset>\n");
    sitemap
}

/// Number of `<url>` entries the sitemap holds
pub fn url_count(config: &SiteConfig, directory: &PostDirectory) -> usize {
    config.static_routes.len() + directory.len() + routable_tags(directory).len()
}

fn push_url(
    sitemap: &mut String,
    config: &SiteConfig,
    path: &str,
    changefreq: &str,
    priority: &str,
    lastmod: Option<&str>,
) {
    sitemap.push_str("  <url>\n");
    sitemap.push_str(&format!(
        "    <loc>{}</loc>\n",
        escape_xml(&config.absolute_url(path))
    ));
    if let Some(lastmod) = lastmod {
        sitemap.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    sitemap.push_str(&format!(
        "    <changefreq>{}</changefreq>\n",
        escape_xml(changefreq)
    ));
    sitemap.push_str(&format!(
        "    <priority>{}</priority>\n",
        escape_xml(priority)
    ));
    sitemap.push_str("  </url>\n");
}
