//! Web dashboard resources.
//!
//! Files directly inside the reserved `webdashboards` directory (matched
//! case-insensitively below the root) are installed to a fixed server
//! location rather than by type. Each gets a generic `resource` entry with a
//! target directory and a server instance binding. Nested directories are not
//! special and fall through to generic classification.

use crate::classify::ResourceType;
use crate::descriptor::{ExclusionSet, ResourceEntry};
use crate::scan::ScanResult;
use crate::{WEB_DASHBOARDS_DIR, WEB_DASHBOARDS_INSTANCE, WEB_DASHBOARDS_TARGET_DIR};
use tracing::debug;

/// Build the web dashboard entries of a scanned tree.
///
/// Every file that produces an entry is claimed in `exclusions`; files whose
/// name is already excluded are skipped. Returns no entries when the root has
/// no web dashboard directory.
pub(crate) fn build(scan: &ScanResult, exclusions: &mut ExclusionSet) -> Vec<ResourceEntry> {
    let Some(dir) = scan.web_dashboards() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for file in scan.files_in(dir) {
        if !exclusions.insert(&file.name) {
            debug!(name = %file.name, "Web dashboard excluded");
            continue;
        }

        // The prefix is the reserved literal, not the on-disk casing.
        let resource = format!("{WEB_DASHBOARDS_DIR}/{}", file.name);
        debug!(%resource, "Web dashboard resource");
        entries.push(
            ResourceEntry::new(resource, Some(ResourceType::Resource))
                .with_target_dir(WEB_DASHBOARDS_TARGET_DIR)
                .with_instance(WEB_DASHBOARDS_INSTANCE),
        );
    }
    entries
}
