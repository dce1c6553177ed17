//! Fastpack inspection utilities.
//!
//! The [`PackLoader`] opens a finished fastpack and exposes its generated
//! header and descriptor.

use crate::manifest::parse_main_section;
use crate::{DESCRIPTOR_FILE, MANIFEST_PATH, PackError, PackResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Loader for fastpack archives.
///
/// # Example
///
/// ```no_run
/// use fastpack::loader::PackLoader;
///
/// let loader = PackLoader::open("Easy Travel_6.5.0.jar")?;
/// println!("{}", loader.descriptor());
/// # Ok::<(), fastpack::PackError>(())
/// ```
#[derive(Debug)]
pub struct PackLoader {
    archive: ZipArchive<File>,
    manifest: Vec<(String, String)>,
    descriptor: String,
}

impl PackLoader {
    /// Open a fastpack for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> PackResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut archive = ZipArchive::new(file)?;

        let manifest = parse_main_section(&read_text(&mut archive, MANIFEST_PATH)?);
        let descriptor = read_text(&mut archive, DESCRIPTOR_FILE)?;

        Ok(Self {
            archive,
            manifest,
            descriptor,
        })
    }

    /// Header attributes in file order.
    #[must_use]
    pub fn manifest(&self) -> &[(String, String)] {
        &self.manifest
    }

    /// Value of one header attribute.
    #[must_use]
    pub fn manifest_value(&self, name: &str) -> Option<&str> {
        self.manifest
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `plugin.xml` text.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Entry names in archive order.
    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(str::to_string))
            .collect()
    }

    /// Read one entry's bytes.
    pub fn read_file(&mut self, name: &str) -> PackResult<Vec<u8>> {
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|_| PackError::MissingFile(name.to_string()))?;
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        Ok(contents)
    }
}

fn read_text(archive: &mut ZipArchive<File>, name: &str) -> PackResult<String> {
    let mut entry = archive
        .by_name(name)
        .map_err(|_| PackError::MissingFile(format!("{name} not found in archive")))?;
    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    Ok(text)
}
