//! Installer resource types and the suffix rules that assign them.

use std::fmt;

/// Resource type understood by the fastpack installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Dashboard (`*.dashboard.xml`).
    Dashboard,
    /// System profile (`*.profile.xml`).
    SystemProfile,
    /// User plugin (`*.jar`).
    UserPlugin,
    /// License file (`*.key`).
    LicenseFile,
    /// Stored session (`*.dts`).
    Session,
    /// Sensor pack; every directory.
    SensorPack,
    /// Generic resource installed to an explicit target directory.
    Resource,
}

impl ResourceType {
    /// Value of the `resource_type` attribute.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::SystemProfile => "systemProfile",
            Self::UserPlugin => "userPlugin",
            Self::LicenseFile => "licenseFile",
            Self::Session => "session",
            Self::SensorPack => "sensorPack",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suffix rules, checked in order. First match wins.
const SUFFIX_RULES: &[(&str, ResourceType)] = &[
    (".dashboard.xml", ResourceType::Dashboard),
    (".profile.xml", ResourceType::SystemProfile),
    (".jar", ResourceType::UserPlugin),
    (".key", ResourceType::LicenseFile),
    (".dts", ResourceType::Session),
];

/// Classify a file or directory name.
///
/// Suffixes are matched case-sensitively. A directory whose name matches no
/// suffix is a sensor pack; any other file gets no type at all.
#[must_use]
pub fn classify(name: &str, is_directory: bool) -> Option<ResourceType> {
    SUFFIX_RULES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, resource_type)| *resource_type)
        .or(is_directory.then_some(ResourceType::SensorPack))
}
