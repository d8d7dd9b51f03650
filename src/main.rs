//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands;
use folio::Site;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content pipeline and static exports for a personal site and blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post dated today
    New {
        /// Title of the new post
        #[arg(default_value = commands::new::DEFAULT_TITLE)]
        title: String,

        /// Slug, instead of one derived from the date and title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Write sitemap.xml, rss.xml and the route folders
    #[command(alias = "b")]
    Build {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Write sitemap.xml
    Sitemap,

    /// Write rss.xml
    Rss,

    /// Copy the shell document into a folder per route
    StaticPaths,

    /// Serve the output directory locally
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove generated artifacts from the output folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let site = Site::new(&base_dir)?;
            let path = site.new_post(&title, slug.as_deref())?;
            println!("Created {:?}", path);
        }

        Commands::Build { watch } => {
            let site = Site::new(&base_dir)?;
            site.build()?;
            println!("Built successfully!");

            if watch {
                tokio::task::spawn_blocking(move || commands::build::watch(&site)).await??;
            }
        }

        Commands::Sitemap => {
            let site = Site::new(&base_dir)?;
            commands::build::sitemap(&site)?;
        }

        Commands::Rss => {
            let site = Site::new(&base_dir)?;
            commands::build::rss(&site)?;
        }

        Commands::StaticPaths => {
            let site = Site::new(&base_dir)?;
            commands::build::static_paths(&site)?;
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = Site::new(&base_dir)?;

            // Build first; the server still starts on failure
            if let Err(e) = site.build() {
                tracing::warn!("Build failed: {:#}", e);
            }

            folio::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
