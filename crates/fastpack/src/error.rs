//! Error types for fastpack operations.

use thiserror::Error;

/// Errors that can occur while building or reading a fastpack.
#[derive(Debug, Error)]
pub enum PackError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The input root could not be listed.
    #[error("Cannot scan {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor tree could not be rendered as XML.
    #[error("Descriptor serialization failed: {0}")]
    Serialization(String),

    /// Opening, writing or closing the output archive failed.
    #[error("Failed to write archive {path}: {reason}")]
    ArchiveWrite { path: String, reason: String },

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Missing required file in an existing archive.
    #[error("Missing required file: {0}")]
    MissingFile(String),
}

impl From<toml::de::Error> for PackError {
    fn from(err: toml::de::Error) -> Self {
        PackError::Config(err.to_string())
    }
}
