//! Content loading errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a post could not be produced from the content store
#[derive(Debug, Error)]
pub enum ContentError {
    /// No file exists for the requested id
    #[error("Post not found: {0}")]
    NotFound(String),

    /// The id is not a plain file stem (empty, contains a path separator, ...)
    #[error("Invalid post id: {0:?}")]
    InvalidId(String),

    /// The file exists but could not be read as UTF-8 text
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The front-matter block is not a valid YAML mapping
    #[error("Malformed front matter: {0}")]
    FrontMatter(String),
}

impl ContentError {
    /// Whether this error only means "there is nothing there"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}
