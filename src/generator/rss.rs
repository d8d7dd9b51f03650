//! `rss.xml` export (RSS 2.0)

use crate::config::SiteConfig;
use crate::content::PostDirectory;
use crate::helpers::escape_xml;

/// File name of the feed in the output directory
pub const RSS_FILE: &str = "rss.xml";

/// Render the feed with one item per post, newest first
pub fn render_rss(config: &SiteConfig, directory: &PostDirectory) -> String {
    let base_url = config.base_url();
    let title = format!("{}{}", config.name, config.feed.title_suffix);
    let description = config
        .feed
        .description
        .clone()
        .unwrap_or_else(|| format!("Blog posts from {}", config.name));

    let mut rss = String::new();
    rss.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    rss.push('\n');
    rss.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    rss.push('\n');
    rss.push_str("  <channel>\n");
    rss.push_str(&format!("    <title>{}</title>\n", escape_xml(&title)));
    rss.push_str(&format!(
        "    <link>{}</link>\n",
        escape_xml(&config.absolute_url("/blog"))
    ));
    rss.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&description)
    ));
    rss.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&config.language)
    ));
    rss.push_str(&format!(
        "    <atom:link href=\"{}/{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        escape_xml(base_url),
        RSS_FILE
    ));

    for post in directory.list_all() {
        let link = escape_xml(&config.absolute_url(&post.path()));
        rss.push_str("    <item>\n");
        rss.push_str(&format!("      <title>{}</title>\n", escape_xml(&post.title)));
        rss.push_str(&format!("      <link>{}</link>\n", link));
        rss.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            link
        ));
        rss.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            post.pub_date_rfc2822()
        ));
        if !post.description.trim().is_empty() {
            rss.push_str(&format!(
                "      <description>{}</description>\n",
                escape_xml(&post.description)
            ));
        }
        rss.push_str("    </item>\n");
    }

    rss.push_str("  </channel>\n");
    rss.push_str("</rss>\n");
    rss
}
