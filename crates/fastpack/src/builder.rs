//! Fastpack creation.
//!
//! The [`FastpackBuilder`] scans an input directory, generates the bundle
//! header and installer descriptor, and writes everything into
//! `<root>/<name>_<version>.jar`.

use crate::archive::PackWriter;
use crate::config::PackConfig;
use crate::descriptor::{Descriptor, ExclusionSet};
use crate::manifest::PackageHeader;
use crate::scan::{FileRef, scan};
use crate::{ARCHIVE_EXTENSION, DESCRIPTOR_FILE, MANIFEST_PATH, PackResult};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Builder for one fastpack.
///
/// # Example
///
/// ```no_run
/// use fastpack::{Compression, FastpackBuilder, PackConfig};
///
/// let config = PackConfig {
///     compression: Compression::Stored,
///     ..PackConfig::default()
/// };
/// let archive = FastpackBuilder::new("packs/demo", "Demo Patch", "4.1.0.2599")
///     .with_config(config)
///     .build()?;
/// # Ok::<(), fastpack::PackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FastpackBuilder {
    root: PathBuf,
    name: String,
    version: String,
    config: PackConfig,
}

impl FastpackBuilder {
    /// Create a builder for the directory `root`.
    pub fn new<P: AsRef<Path>>(root: P, name: &str, version: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            name: name.to_string(),
            version: version.to_string(),
            config: PackConfig::default(),
        }
    }

    /// Use the given configuration.
    #[must_use]
    pub fn with_config(mut self, config: PackConfig) -> Self {
        self.config = config;
        self
    }

    /// File name of the archive this builder writes.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}_{}.{ARCHIVE_EXTENSION}", self.name, self.version)
    }

    /// Build the fastpack and return the path of the written archive.
    ///
    /// A failure after the archive was created leaves the partial file in
    /// place.
    pub fn build(&self) -> PackResult<PathBuf> {
        info!(root = %self.root.display(), name = %self.name, version = %self.version, "Building fastpack");

        let header = PackageHeader::new(&self.name, &self.version);
        let scan = scan(&self.root)?;

        let output = scan.root().join(self.output_file_name());

        let mut exclusions = ExclusionSet::new();
        if let Some(stale) = scan.files().iter().find(|f| f.path == output) {
            exclusions.insert(&stale.name);
        }
        let descriptor = Descriptor::assemble(&self.name, &scan, &mut exclusions);
        let descriptor_xml = descriptor.to_xml_string()?;

        let mut writer = PackWriter::create(&output, &header, self.config.compression)?;
        writer.add_bytes(DESCRIPTOR_FILE, descriptor_xml.as_bytes())?;

        let mut packed = 0usize;
        for file in scan.files() {
            if file.path == output {
                warn!(path = %file.relative_path, "Skipping the archive being written");
                continue;
            }
            if is_generated_entry(&file.relative_path) {
                warn!(path = %file.relative_path, "Skipping file that collides with a generated entry");
                continue;
            }
            if writer.contains(&file.relative_path) {
                warn!(
                    path = %file.relative_path,
                    source = %file.path.display(),
                    "Skipping file whose name is not valid UTF-8 and maps onto an already packed entry"
                );
                continue;
            }
            if self.is_previous_archive(file) {
                warn!(path = %file.relative_path, "Packing an earlier fastpack as an ordinary file");
            }
            writer.add_file(&file.relative_path, &file.path)?;
            packed += 1;
        }

        let path = writer.finish()?;
        info!(
            archive = %path.display(),
            files = packed,
            resources = descriptor.entries().len(),
            "Fastpack created"
        );
        Ok(path)
    }

    /// A root-level archive that looks like an earlier output of this pack.
    fn is_previous_archive(&self, file: &FileRef) -> bool {
        !file.relative_path.contains('/')
            && file.name.starts_with(&format!("{}_", self.name))
            && file.name.ends_with(&format!(".{ARCHIVE_EXTENSION}"))
    }
}

/// Archive paths written from generated content rather than from the input.
fn is_generated_entry(relative_path: &str) -> bool {
    relative_path == DESCRIPTOR_FILE || relative_path == MANIFEST_PATH
}

/// Build a fastpack, returning the archive path or the error.
pub fn try_pack<P: AsRef<Path>>(root: P, name: &str, version: &str) -> PackResult<PathBuf> {
    FastpackBuilder::new(root, name, version).build()
}

/// Build a fastpack with the default configuration.
///
/// Errors are logged and reported as `false`.
pub fn pack<P: AsRef<Path>>(root: P, name: &str, version: &str) -> bool {
    let root = root.as_ref();
    match try_pack(root, name, version) {
        Ok(_) => true,
        Err(err) => {
            error!(root = %root.display(), error = %err, "Fastpack build failed");
            false
        }
    }
}

#[cfg(test)]
#[path = "builder/builder_tests.rs"]
mod builder_tests;
