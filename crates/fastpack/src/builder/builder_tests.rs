#![allow(non_snake_case)]

use super::*;
use crate::loader::PackLoader;
use crate::{Compression, PackError};
use std::fs;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn file_ref(relative_path: &str) -> FileRef {
    FileRef {
        path: PathBuf::from("/data").join(relative_path),
        relative_path: relative_path.to_string(),
        name: relative_path.rsplit('/').next().unwrap().to_string(),
    }
}

#[test]
fn FastpackBuilder___output_file_name___uses_display_name_and_version() {
    let builder = FastpackBuilder::new("/data", "Easy Travel", "6.5.0");

    assert_eq!(builder.output_file_name(), "Easy Travel_6.5.0.jar");
}

#[test]
fn FastpackBuilder___is_previous_archive___matches_root_level_outputs_only() {
    let builder = FastpackBuilder::new("/data", "Demo", "2.0");

    assert!(builder.is_previous_archive(&file_ref("Demo_1.0.jar")));
    assert!(!builder.is_previous_archive(&file_ref("libs/Demo_1.0.jar")));
    assert!(!builder.is_previous_archive(&file_ref("Other_1.0.jar")));
    assert!(!builder.is_previous_archive(&file_ref("Demo_1.0.zip")));
}

#[test]
fn FastpackBuilder___build___writes_archive_inside_root() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a.dashboard.xml", b"<dashboard/>");

    let path = FastpackBuilder::new(temp_dir.path(), "Demo", "1.0")
        .build()
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "Demo_1.0.jar");
    assert_eq!(path.parent().unwrap(), std::path::absolute(temp_dir.path()).unwrap());
}

#[test]
fn FastpackBuilder___with_config___applies_compression() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "big.txt", &[b'a'; 4096]);
    let config = PackConfig {
        compression: Compression::Stored,
        ..PackConfig::default()
    };

    let path = FastpackBuilder::new(temp_dir.path(), "Demo", "1.0")
        .with_config(config)
        .build()
        .unwrap();

    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let entry = archive.by_name("big.txt").unwrap();
    assert_eq!(entry.compression(), zip::CompressionMethod::Stored);
}

#[test]
fn FastpackBuilder___root_plugin_xml___is_replaced_by_generated_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "plugin.xml", b"stale descriptor");
    touch(temp_dir.path(), "sub/plugin.xml", b"nested copy");

    let path = FastpackBuilder::new(temp_dir.path(), "Demo", "1.0")
        .build()
        .unwrap();

    let mut loader = PackLoader::open(&path).unwrap();
    assert!(loader.descriptor().starts_with("<?xml"));
    assert_eq!(loader.read_file("sub/plugin.xml").unwrap(), b"nested copy");
    let plugin_entries = loader
        .list_files()
        .iter()
        .filter(|name| *name == "plugin.xml")
        .count();
    assert_eq!(plugin_entries, 1);
    assert!(!loader.descriptor().contains(r#"resource="sub/plugin.xml""#));
}

#[test]
fn FastpackBuilder___rerun_with_same_version___does_not_pack_itself() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a.key", b"license");
    let builder = FastpackBuilder::new(temp_dir.path(), "Demo", "1.0");

    builder.build().unwrap();
    let path = builder.build().unwrap();

    let loader = PackLoader::open(&path).unwrap();
    assert!(!loader.list_files().contains(&"Demo_1.0.jar".to_string()));
    assert!(!loader.descriptor().contains("Demo_1.0.jar"));
}

#[test]
fn FastpackBuilder___earlier_version_archive___is_packed_as_input() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a.key", b"license");

    FastpackBuilder::new(temp_dir.path(), "Demo", "1.0")
        .build()
        .unwrap();
    let path = FastpackBuilder::new(temp_dir.path(), "Demo", "2.0")
        .build()
        .unwrap();

    let loader = PackLoader::open(&path).unwrap();
    assert!(loader.list_files().contains(&"Demo_1.0.jar".to_string()));
    assert!(
        loader
            .descriptor()
            .contains(r#"resource="Demo_1.0.jar" resource_type="userPlugin""#)
    );
}

#[test]
fn try_pack___missing_root___returns_scan_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = try_pack(temp_dir.path().join("missing"), "Demo", "1.0");

    assert!(matches!(result, Err(PackError::Scan { .. })));
}

#[test]
fn try_pack___unserializable_name___fails_before_creating_archive() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a.key", b"license");

    let result = try_pack(temp_dir.path(), "Bad\u{1}Name", "1.0");

    assert!(matches!(result, Err(PackError::Serialization(_))));
    assert!(!temp_dir.path().join("Bad\u{1}Name_1.0.jar").exists());
}

#[test]
fn pack___success___returns_true() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a.dashboard.xml", b"<dashboard/>");

    assert!(pack(temp_dir.path(), "Demo", "1.0"));
    assert!(temp_dir.path().join("Demo_1.0.jar").is_file());
}

#[test]
fn pack___failure___returns_false() {
    let temp_dir = TempDir::new().unwrap();

    assert!(!pack(temp_dir.path().join("missing"), "Demo", "1.0"));
}

#[test_case::test_case("plugin.xml", true ; "descriptor")]
#[test_case::test_case("META-INF/MANIFEST.MF", true ; "manifest")]
#[test_case::test_case("sub/plugin.xml", false ; "nested descriptor name")]
#[test_case::test_case("META-INF/other.txt", false ; "other meta inf file")]
#[test_case::test_case("a.key", false ; "ordinary file")]
fn is_generated_entry___matches_only_synthetic_paths(path: &str, expected: bool) {
    assert_eq!(is_generated_entry(path), expected);
}

#[cfg(target_os = "linux")]
#[test]
fn FastpackBuilder___lossy_name_collision___packs_first_file_and_succeeds() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(OsStr::from_bytes(b"a\xfe.key")), b"first").unwrap();
    fs::write(temp_dir.path().join(OsStr::from_bytes(b"a\xff.key")), b"second").unwrap();

    let path = FastpackBuilder::new(temp_dir.path(), "Demo", "1.0")
        .build()
        .unwrap();

    let mut loader = PackLoader::open(&path).unwrap();
    let lossy = "a\u{FFFD}.key";
    let count = loader.list_files().iter().filter(|n| *n == lossy).count();
    assert_eq!(count, 1);
    assert_eq!(loader.read_file(lossy).unwrap(), b"first");
    assert_eq!(loader.descriptor().matches(lossy).count(), 1);
}

#[cfg(unix)]
#[test]
fn FastpackBuilder___symlink_loop_and_dangling_link___are_skipped() {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a.key", b"license");
    symlink(temp_dir.path(), temp_dir.path().join("loop")).unwrap();
    symlink(temp_dir.path().join("nope"), temp_dir.path().join("dangling")).unwrap();

    let path = FastpackBuilder::new(temp_dir.path(), "Demo", "1.0")
        .build()
        .unwrap();

    let loader = PackLoader::open(&path).unwrap();
    assert_eq!(
        loader.list_files(),
        vec!["META-INF/MANIFEST.MF", "plugin.xml", "a.key"]
    );
    assert!(loader.descriptor().contains(r#"resource="a.key""#));
    assert!(!loader.descriptor().contains("loop"));
    assert!(!loader.descriptor().contains("dangling"));
}
