//! Error taxonomy for metadata generation.
//!
//! Two tiers: [`MetadataError`] aborts the run, [`ContentError`] only affects the
//! one scenario file it was raised for.

use std::path::PathBuf;

/// Fatal errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("cannot read scenario root {root}: {source}")]
    RootUnreadable {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Result type for metadata generation.
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Recoverable errors raised while decoding a single scenario file.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported tag {0}")]
    UnsupportedTag(String),
}

/// A scenario file whose content could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("could not parse {path}: {error}")]
pub struct ParseFailure {
    /// Forward-slash relative path of the offending file.
    pub path: String,
    #[source]
    pub error: ContentError,
}
