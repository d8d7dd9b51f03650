//! Run the static exports

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Write the sitemap, the feed and the route folders
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();
    Generator::new(site).build()?;
    tracing::info!("Built in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Write `sitemap.xml` only
pub fn sitemap(site: &Site) -> Result<()> {
    Generator::new(site).sitemap().map(|_| ())
}

/// Write `rss.xml` only
pub fn rss(site: &Site) -> Result<()> {
    Generator::new(site).rss().map(|_| ())
}

/// Write the route folders only
pub fn static_paths(site: &Site) -> Result<()> {
    Generator::new(site).static_paths().map(|_| ())
}

/// Rebuild whenever content, the about page or the configuration changes
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if site.content_dir.exists() {
        watcher.watch(&site.content_dir, notify::RecursiveMode::NonRecursive)?;
    }
    if site.about_path.exists() {
        watcher.watch(&site.about_path, notify::RecursiveMode::NonRecursive)?;
    }
    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();
    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding...");
                    if let Err(e) = reload(site).and_then(|site| run(&site)) {
                        tracing::error!("Build failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the configuration, which may have changed on disk
fn reload(site: &Site) -> Result<Site> {
    Site::new(&site.base_dir)
}
