//! List site content

use anyhow::Result;

use crate::generator::route_pages;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let directory = site.load_directory()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", directory.len());
            for post in directory.list_all() {
                println!(
                    "  {} - {} ({} min) [{}]",
                    post.date_string(),
                    post.title,
                    post.read_time_minutes,
                    post.source
                );
            }
        }
        "tag" | "tags" => {
            let counts = directory.tag_counts();
            println!("Tags ({}):", counts.len());
            let mut tags: Vec<_> = counts.into_iter().collect();
            // Most used first, then alphabetical
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "route" | "routes" => {
            let pages = route_pages(&site.config, &directory);
            println!("Routes ({}):", pages.len() + 1);
            println!("  /");
            for page in pages {
                println!("  {}", page.route.path());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, route",
                content_type
            );
        }
    }

    Ok(())
}
