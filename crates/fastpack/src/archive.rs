//! Low-level fastpack archive writer.
//!
//! [`PackWriter`] produces a JAR-style ZIP: the bundle header goes first as
//! `META-INF/MANIFEST.MF`, followed by entries supplied either from memory or
//! streamed from disk.

use crate::config::Compression;
use crate::manifest::PackageHeader;
use crate::{MANIFEST_PATH, PackError, PackResult};
use std::collections::HashSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Entries at or above this size need ZIP64 extensions.
const LARGE_FILE_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Writer for one output archive.
///
/// Dropping the writer without calling [`PackWriter::finish`] leaves an
/// incomplete archive on disk.
pub struct PackWriter {
    path: PathBuf,
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
    entries: HashSet<String>,
}

impl PackWriter {
    /// Create the archive at `path` and write the header entry.
    pub fn create<P: AsRef<Path>>(
        path: P,
        header: &PackageHeader,
        compression: Compression,
    ) -> PackResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| archive_error(&path, e))?;

        let mut writer = Self {
            path,
            zip: ZipWriter::new(file),
            options: SimpleFileOptions::default()
                .compression_method(compression.method())
                .unix_permissions(0o644),
            entries: HashSet::new(),
        };

        writer.add_bytes(MANIFEST_PATH, header.to_manifest().as_bytes())?;
        Ok(writer)
    }

    /// Path of the archive being written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an entry with this path has been written.
    #[must_use]
    pub fn contains(&self, archive_path: &str) -> bool {
        self.entries.contains(archive_path)
    }

    /// Add an entry whose content is held in memory.
    pub fn add_bytes(&mut self, archive_path: &str, contents: &[u8]) -> PackResult<()> {
        let options = self.options;
        self.start_entry(archive_path, options)?;
        self.zip
            .write_all(contents)
            .map_err(|e| archive_error(&self.path, e))?;
        Ok(())
    }

    /// Add an entry streamed from a file on disk.
    pub fn add_file<P: AsRef<Path>>(&mut self, archive_path: &str, source: P) -> PackResult<()> {
        let source = source.as_ref();
        let mut input = File::open(source)
            .map_err(|e| archive_error(&self.path, format!("{}: {e}", source.display())))?;
        let len = input
            .metadata()
            .map_err(|e| archive_error(&self.path, format!("{}: {e}", source.display())))?
            .len();

        let options = self.options.large_file(len >= LARGE_FILE_THRESHOLD);
        self.start_entry(archive_path, options)?;
        io::copy(&mut input, &mut self.zip)
            .map_err(|e| archive_error(&self.path, format!("{}: {e}", source.display())))?;
        Ok(())
    }

    /// Write the central directory and close the archive.
    pub fn finish(self) -> PackResult<PathBuf> {
        let Self { path, zip, .. } = self;
        let mut file = zip.finish().map_err(|e| archive_error(&path, e))?;
        file.flush().map_err(|e| archive_error(&path, e))?;
        Ok(path)
    }

    fn start_entry(&mut self, archive_path: &str, options: SimpleFileOptions) -> PackResult<()> {
        if !self.entries.insert(archive_path.to_string()) {
            return Err(archive_error(
                &self.path,
                format!("duplicate entry {archive_path}"),
            ));
        }
        debug!(entry = archive_path, "Writing archive entry");
        self.zip
            .start_file(archive_path, options)
            .map_err(|e| archive_error(&self.path, e))
    }
}

fn archive_error(path: &Path, reason: impl Display) -> PackError {
    PackError::ArchiveWrite {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
