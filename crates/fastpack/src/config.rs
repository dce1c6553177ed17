//! Packaging configuration

use crate::PackResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Compression applied to archive entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Deflate every entry
    #[default]
    Deflated,
    /// Store entries uncompressed
    Stored,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Optional settings for a packaging run
///
/// Installer-facing values (vendor, extension point, target directories) are
/// fixed and live as crate constants; this only covers how the tool runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Compression applied to archive entries
    #[serde(default)]
    pub compression: Compression,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            compression: Compression::default(),
        }
    }
}

impl PackConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text; blank input yields defaults
    pub fn from_toml_str(content: &str) -> PackResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> PackResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
