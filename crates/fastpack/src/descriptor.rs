//! Installer descriptor (`plugin.xml`) assembly.
//!
//! The descriptor always has the same skeleton:
//!
//! ```text
//! <plugin>
//!   <extension id="Installer Content" point="com.dynatrace.diagnostics.InstallerContent">
//!     <metainfo installer_type="resourcepack" name="...">
//!       <resource .../>            web dashboards first, then files, then directories
//!     </metainfo>
//!   </extension>
//! </plugin>
//! ```

use crate::classify::{ResourceType, classify};
use crate::scan::{DirKind, ScanResult};
use crate::xml::XmlNode;
use crate::{
    DESCRIPTOR_FILE, EXTENSION_ID, EXTENSION_POINT, INSTALLER_TYPE, MANIFEST_FILE, META_INF_DIR,
    PackResult, WEB_DASHBOARDS_DIR, webdash,
};
use std::collections::HashSet;
use tracing::debug;

/// Base names that must not produce a resource entry.
///
/// Seeded with the archive's reserved names and grown while the descriptor is
/// assembled, so that no base name is described twice.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Names excluded before any entry is produced.
    pub const RESERVED: [&'static str; 4] = [
        MANIFEST_FILE,
        DESCRIPTOR_FILE,
        META_INF_DIR,
        WEB_DASHBOARDS_DIR,
    ];

    /// Create a set holding the reserved names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: Self::RESERVED.iter().map(|n| (*n).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Claim `name` for an entry. Returns `false` if it was already excluded.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// One `<resource>` element of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Archive-relative path of the resource.
    pub resource: String,
    /// Installer type; `None` writes no `resource_type` attribute.
    pub resource_type: Option<ResourceType>,
    /// Installer directory overriding the type's default location.
    pub target_dir: Option<String>,
    /// Server instances the resource is bound to.
    pub instances: Vec<String>,
}

impl ResourceEntry {
    pub fn new(resource: impl Into<String>, resource_type: Option<ResourceType>) -> Self {
        Self {
            resource: resource.into(),
            resource_type,
            target_dir: None,
            instances: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_target_dir(mut self, target_dir: impl Into<String>) -> Self {
        self.target_dir = Some(target_dir.into());
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instances.push(instance.into());
        self
    }

    /// Build the `<resource>` element.
    #[must_use]
    pub fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("resource").with_attribute("resource", &self.resource);
        if let Some(resource_type) = self.resource_type {
            node.set_attribute("resource_type", resource_type.as_str());
        }
        if let Some(target_dir) = &self.target_dir {
            node.set_attribute("target_dir", target_dir);
        }
        for instance in &self.instances {
            node.push_child(XmlNode::new("instance").with_attribute("instance", instance));
        }
        node
    }
}

/// The complete installer descriptor for one fastpack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: String,
    entries: Vec<ResourceEntry>,
}

impl Descriptor {
    /// Assemble the descriptor for a scanned tree.
    ///
    /// Entries are ordered web dashboards, files, directories, each group in
    /// scan order. Every produced entry claims its base name in `exclusions`.
    pub fn assemble(display_name: &str, scan: &ScanResult, exclusions: &mut ExclusionSet) -> Self {
        let mut entries = webdash::build(scan, exclusions);

        for file in scan.files() {
            if !exclusions.insert(&file.name) {
                debug!(path = %file.relative_path, "Excluded from descriptor");
                continue;
            }
            let resource_type = classify(&file.name, false);
            debug!(path = %file.relative_path, ?resource_type, "Classified file");
            entries.push(ResourceEntry::new(&file.relative_path, resource_type));
        }

        for dir in scan.directories() {
            if dir.kind == DirKind::WebDashboards || !exclusions.insert(&dir.name) {
                debug!(path = %dir.relative_path, "Excluded from descriptor");
                continue;
            }
            debug!(path = %dir.relative_path, "Classified directory as sensor pack");
            entries.push(ResourceEntry::new(
                &dir.relative_path,
                Some(ResourceType::SensorPack),
            ));
        }

        Self {
            name: display_name.to_string(),
            entries,
        }
    }

    /// Display name written to `metainfo`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resource entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Build the element tree.
    #[must_use]
    pub fn to_node(&self) -> XmlNode {
        let mut metainfo = XmlNode::new("metainfo")
            .with_attribute("installer_type", INSTALLER_TYPE)
            .with_attribute("name", &self.name);
        for entry in &self.entries {
            metainfo.push_child(entry.to_node());
        }

        let extension = XmlNode::new("extension")
            .with_attribute("id", EXTENSION_ID)
            .with_attribute("point", EXTENSION_POINT)
            .with_child(metainfo);

        XmlNode::new("plugin").with_child(extension)
    }

    /// Render the descriptor as `plugin.xml` text.
    pub fn to_xml_string(&self) -> PackResult<String> {
        self.to_node().to_xml_string()
    }
}
