//! Integration tests for the `fastpack` binary.

#![allow(non_snake_case)]

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fastpack(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fastpack"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

mod build {
    use super::*;

    #[test]
    fn build___resource_directory___writes_archive_and_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.dashboard.xml"), b"<dashboard/>").unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();

        let output = fastpack(&["build", &dir, "Demo", "1.0"]);

        assert!(output.status.success());
        assert!(temp_dir.path().join("Demo_1.0.jar").is_file());
        assert!(stdout(&output).contains("Fastpack created:"));
    }

    #[test]
    fn build___missing_directory___exits_with_failure() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("missing").to_string_lossy().to_string();

        let output = fastpack(&["build", &dir, "Demo", "1.0"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to build fastpack"));
    }

    #[test]
    fn build___config_file___is_honoured() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("dt.key"), b"license").unwrap();
        let config = temp_dir.path().join("fastpack.toml");
        fs::write(&config, "compression = \"stored\"\n").unwrap();

        let output = fastpack(&[
            "build",
            &input.to_string_lossy(),
            "Demo",
            "1.0",
            "--config",
            &config.to_string_lossy(),
        ]);

        assert!(output.status.success());
        assert!(input.join("Demo_1.0.jar").is_file());
    }

    #[test]
    fn build___invalid_config___exits_with_failure() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("fastpack.toml");
        fs::write(&config, "compression = \"brotli\"\n").unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();

        let output = fastpack(&["build", &dir, "Demo", "1.0", "-c", &config.to_string_lossy()]);

        assert!(!output.status.success());
        assert!(!temp_dir.path().join("Demo_1.0.jar").exists());
    }

    #[test]
    fn build___missing_arguments___is_a_usage_error() {
        let output = fastpack(&["build", "only-a-dir"]);

        assert!(!output.status.success());
    }
}

mod list {
    use super::*;

    #[test]
    fn list___built_archive___prints_header_descriptor_and_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.profile.xml"), b"<profile/>").unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();
        assert!(fastpack(&["build", &dir, "Easy Travel", "6.5.0"]).status.success());
        let archive = temp_dir.path().join("Easy Travel_6.5.0.jar");

        let output = fastpack(&["list", &archive.to_string_lossy()]);

        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("Bundle-SymbolicName: com.dynatrace.diagnostics.easytravel;singleton:=true"));
        assert!(text.contains(r#"resource="b.profile.xml" resource_type="systemProfile""#));
        assert!(text.contains("  META-INF/MANIFEST.MF"));
        assert!(text.contains("  b.profile.xml"));
    }

    #[test]
    fn list___missing_archive___exits_with_failure() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("absent.jar");

        let output = fastpack(&["list", &archive.to_string_lossy()]);

        assert!(!output.status.success());
    }
}
