//! Fastpack archive builder
//!
//! This crate turns a directory of monitoring-platform artifacts (dashboards,
//! system profiles, license keys, user plugins, sessions, sensor packs and web
//! dashboards) into a single `.jar` fastpack understood by the plugin installer.
//!
//! # Archive Structure
//!
//! ```text
//! Easy Travel_6.5.0.jar
//! ├── META-INF/
//! │   └── MANIFEST.MF             # generated bundle header
//! ├── plugin.xml                  # generated installer descriptor
//! ├── easytravel.dashboard.xml
//! ├── easytravel.profile.xml
//! ├── webdashboards/
//! │   ├── 7b8ed814.xml
//! │   └── 7b8ed814.json
//! └── sensors/
//!     └── ...
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fastpack::FastpackBuilder;
//!
//! let archive = FastpackBuilder::new("/tmp/easytravel", "Easy Travel", "6.5.0").build()?;
//! println!("wrote {}", archive.display());
//! # Ok::<(), fastpack::PackError>(())
//! ```

mod archive;
mod classify;
mod config;
mod descriptor;
mod error;
mod manifest;
mod scan;
mod webdash;
mod xml;

pub mod builder;
pub mod loader;

pub use archive::PackWriter;
pub use builder::{FastpackBuilder, pack, try_pack};
pub use classify::{ResourceType, classify};
pub use config::{Compression, PackConfig};
pub use descriptor::{Descriptor, ExclusionSet, ResourceEntry};
pub use error::PackError;
pub use loader::PackLoader;
pub use manifest::PackageHeader;
pub use scan::{DirKind, DirRef, FileRef, ScanResult, scan};
pub use xml::XmlNode;

/// Result type for fastpack operations.
pub type PackResult<T> = Result<T, PackError>;

/// Archive file extension.
pub const ARCHIVE_EXTENSION: &str = "jar";

/// Descriptor file name within the archive.
pub const DESCRIPTOR_FILE: &str = "plugin.xml";

/// Manifest file name.
pub const MANIFEST_FILE: &str = "MANIFEST.MF";

/// Archive metadata directory.
pub const META_INF_DIR: &str = "META-INF";

/// Manifest path within the archive.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Reserved directory whose direct children are installed as web dashboards.
pub const WEB_DASHBOARDS_DIR: &str = "webdashboards";

/// Installer location for web dashboard resources.
pub const WEB_DASHBOARDS_TARGET_DIR: &str = "conf/dashboards/web";

/// Server instance binding attached to web dashboard resources.
pub const WEB_DASHBOARDS_INSTANCE: &str = "server";

/// `id` attribute of the descriptor's extension element.
pub const EXTENSION_ID: &str = "Installer Content";

/// `point` attribute of the descriptor's extension element.
pub const EXTENSION_POINT: &str = "com.dynatrace.diagnostics.InstallerContent";

/// `installer_type` attribute of the descriptor's metainfo element.
pub const INSTALLER_TYPE: &str = "resourcepack";

/// Vendor written into every bundle header.
pub const BUNDLE_VENDOR: &str = "dynaTrace software GmbH";

/// Bundle every fastpack depends on.
pub const REQUIRE_BUNDLE: &str = "com.dynatrace.diagnostics.sdk";

/// Prefix of the bundle symbolic name.
pub const SYMBOLIC_NAME_PREFIX: &str = "com.dynatrace.diagnostics.";
