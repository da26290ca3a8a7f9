//! Content store errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to enumerate the content store as a whole
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store root is missing, not a directory, or unreadable.
    /// This points at a misconfigured `content_dir`, not at an empty blog.
    #[error("Content store unavailable at {path:?}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to load a single document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
