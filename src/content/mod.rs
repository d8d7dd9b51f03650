//! Content module - handles posts, validation, read time and the post directory

mod directory;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
pub(crate) mod post;
pub mod read_time;

pub use directory::PostDirectory;
pub use error::ContentError;
pub use frontmatter::{DateValue, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{About, Post};
pub use read_time::read_time_minutes;
