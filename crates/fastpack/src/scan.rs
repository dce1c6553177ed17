//! Directory tree scanning.
//!
//! [`scan`] walks the input root depth-first and records every regular file
//! and every directory below it. Entries inside a directory are visited in
//! file-name order so repeated scans of the same tree yield the same result.

use crate::{PackError, PackResult, WEB_DASHBOARDS_DIR};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A regular file found below the scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated.
    pub relative_path: String,
    /// Base name of the file.
    pub name: String,
}

/// How a directory is treated when the descriptor is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Ordinary directory, packaged as a sensor pack.
    Generic,
    /// The reserved web dashboard directory directly below the root.
    WebDashboards,
}

/// A directory found anywhere below the scanned root (never the root itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRef {
    /// Absolute path of the directory.
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated.
    pub relative_path: String,
    /// Base name of the directory.
    pub name: String,
    /// Descriptor treatment.
    pub kind: DirKind,
}

/// Everything found by one [`scan`].
#[derive(Debug, Clone)]
pub struct ScanResult {
    root: PathBuf,
    files: Vec<FileRef>,
    directories: Vec<DirRef>,
}

impl ScanResult {
    /// Absolute path of the scanned root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files in scan order.
    #[must_use]
    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    /// Directories in scan order.
    #[must_use]
    pub fn directories(&self) -> &[DirRef] {
        &self.directories
    }

    /// The reserved web dashboard directory, if the root has one.
    #[must_use]
    pub fn web_dashboards(&self) -> Option<&DirRef> {
        self.directories
            .iter()
            .find(|dir| dir.kind == DirKind::WebDashboards)
    }

    /// Files that are direct children of `dir`, in scan order.
    pub fn files_in<'a>(&'a self, dir: &'a DirRef) -> impl Iterator<Item = &'a FileRef> + 'a {
        self.files
            .iter()
            .filter(move |file| file.path.parent() == Some(dir.path.as_path()))
    }
}

/// Recursively scan `root`.
///
/// Fails only when the root itself cannot be listed. Sub-directories that
/// cannot be read are kept in the result and treated as empty.
pub fn scan(root: impl AsRef<Path>) -> PackResult<ScanResult> {
    let root = std::path::absolute(root.as_ref())?;

    fs::read_dir(&root).map_err(|source| PackError::Scan {
        path: root.display().to_string(),
        source,
    })?;

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();
    let mut directories = Vec::new();
    let mut web_dashboards_found = false;

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path().to_path_buf();
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative_path = relative_archive_path(&root, &path);
        let file_type = entry.file_type();

        if file_type.is_file() {
            if seen.insert(path.clone()) {
                debug!(path = %relative_path, "Found file");
                files.push(FileRef {
                    path,
                    relative_path,
                    name,
                });
            }
        } else if file_type.is_dir() {
            let kind = if entry.depth() == 1
                && !web_dashboards_found
                && name.eq_ignore_ascii_case(WEB_DASHBOARDS_DIR)
            {
                web_dashboards_found = true;
                DirKind::WebDashboards
            } else {
                DirKind::Generic
            };

            debug!(path = %relative_path, ?kind, "Found directory");
            directories.push(DirRef {
                path,
                relative_path,
                name,
                kind,
            });
        } else {
            debug!(path = %relative_path, "Skipping special file");
        }
    }

    Ok(ScanResult {
        root,
        files,
        directories,
    })
}

/// Path of `path` below `root`, joined with `/` regardless of platform.
pub(crate) fn relative_archive_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
