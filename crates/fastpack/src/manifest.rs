//! Bundle header written as the archive's `META-INF/MANIFEST.MF`.
//!
//! The installer loads a fastpack as an OSGi bundle, so the header carries
//! the bundle identity derived from the display name and version plus a few
//! fixed fields.

use crate::{BUNDLE_VENDOR, REQUIRE_BUNDLE, SYMBOLIC_NAME_PREFIX};

/// JAR manifest format version.
pub const MANIFEST_VERSION: &str = "1.0";

/// OSGi bundle manifest version.
pub const BUNDLE_MANIFEST_VERSION: &str = "2";

/// Maximum manifest line length in bytes, line break excluded.
const MAX_LINE_BYTES: usize = 72;

/// Header fields of a fastpack archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageHeader {
    /// Display name with whitespace removed, lowercased.
    pub package_id: String,

    /// Bundle version, verbatim.
    pub bundle_version: String,

    /// Implementation version, verbatim.
    pub implementation_version: String,

    /// Bundle vendor.
    pub vendor: String,

    /// Bundle this fastpack depends on.
    pub require_bundle: String,

    /// Whether the bundle is a singleton.
    pub singleton: bool,
}

impl PackageHeader {
    /// Build the header for a display name and version.
    #[must_use]
    pub fn new(display_name: &str, version: &str) -> Self {
        Self {
            package_id: Self::normalize_name(display_name),
            bundle_version: version.to_string(),
            implementation_version: version.to_string(),
            vendor: BUNDLE_VENDOR.to_string(),
            require_bundle: REQUIRE_BUNDLE.to_string(),
            singleton: true,
        }
    }

    /// Remove all whitespace from a display name and lowercase it.
    #[must_use]
    pub fn normalize_name(display_name: &str) -> String {
        display_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    }

    /// `Bundle-SymbolicName` value.
    #[must_use]
    pub fn symbolic_name(&self) -> String {
        let name = format!("{SYMBOLIC_NAME_PREFIX}{}", self.package_id);
        if self.singleton {
            format!("{name};singleton:=true")
        } else {
            name
        }
    }

    /// Main-section attributes in the order they are written.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Manifest-Version", MANIFEST_VERSION.to_string()),
            ("Bundle-ManifestVersion", BUNDLE_MANIFEST_VERSION.to_string()),
            ("Bundle-Name", self.package_id.clone()),
            ("Bundle-Version", self.bundle_version.clone()),
            ("Bundle-Vendor", self.vendor.clone()),
            ("Implementation-Version", self.implementation_version.clone()),
            ("Require-Bundle", self.require_bundle.clone()),
            ("Bundle-SymbolicName", self.symbolic_name()),
        ]
    }

    /// Render the `MANIFEST.MF` text.
    #[must_use]
    pub fn to_manifest(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.attributes() {
            write_wrapped(&mut out, &format!("{name}: {value}"));
        }
        out.push_str("\r\n");
        out
    }
}

/// Write one attribute line, continuing it on following lines (each
/// prefixed with a space) once it exceeds the line limit.
fn write_wrapped(out: &mut String, line: &str) {
    let mut rest = line;
    let mut limit = MAX_LINE_BYTES;

    while rest.len() > limit {
        let mut split = limit;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        out.push_str(&rest[..split]);
        out.push_str("\r\n ");
        rest = &rest[split..];
        limit = MAX_LINE_BYTES - 1;
    }

    out.push_str(rest);
    out.push_str("\r\n");
}

/// Parse the main section of a manifest into ordered `(name, value)` pairs.
///
/// Continuation lines are joined; parsing stops at the first blank line.
#[must_use]
pub fn parse_main_section(text: &str) -> Vec<(String, String)> {
    let mut attributes: Vec<(String, String)> = Vec::new();

    for line in text.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            break;
        }
        if let Some(continuation) = line.strip_prefix(' ') {
            if let Some((_, value)) = attributes.last_mut() {
                value.push_str(continuation);
            }
            continue;
        }
        if let Some((name, value)) = line.split_once(": ") {
            attributes.push((name.to_string(), value.to_string()));
        }
    }

    attributes
}
