//! Content validation errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading content. All of them are fatal for a build.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Post has malformed frontmatter: {file}")]
    Frontmatter {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Post is missing required frontmatter \"{field}\": {file}")]
    MissingField { file: String, field: &'static str },

    #[error("Post slug \"{slug}\" is not a usable path segment: {file}")]
    InvalidSlug { file: String, slug: String },

    #[error("Post has invalid frontmatter \"date\" ({value}): {file}")]
    InvalidDate { file: String, value: String },

    #[error("Post slug \"{slug}\" is already used by {first}: {file}")]
    DuplicateSlug {
        slug: String,
        first: String,
        file: String,
    },
}

impl ContentError {
    /// File name of the offending content, when known
    pub fn file(&self) -> Option<&str> {
        match self {
            ContentError::Io(_, _) => None,
            ContentError::Frontmatter { file, .. }
            | ContentError::MissingField { file, .. }
            | ContentError::InvalidSlug { file, .. }
            | ContentError::InvalidDate { file, .. }
            | ContentError::DuplicateSlug { file, .. } => Some(file),
        }
    }
}
