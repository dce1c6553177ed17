//! Fastpack creation and inspection commands.

use anyhow::{Context, Result};
use fastpack::{FastpackBuilder, PackConfig, PackLoader};
use std::path::PathBuf;

/// Load the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<String>) -> Result<PackConfig> {
    match path {
        Some(path) => PackConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration: {path}")),
        None => Ok(PackConfig::default()),
    }
}

/// Run the build command.
pub fn run(dir: &str, name: &str, version: &str, config: PackConfig) -> Result<PathBuf> {
    println!("Creating fastpack: {name} v{version}");
    println!("  Input directory: {dir}");

    let output_path = FastpackBuilder::new(dir, name, version)
        .with_config(config)
        .build()
        .with_context(|| format!("Failed to build fastpack from {dir}"))?;

    println!("Fastpack created: {}", output_path.display());
    Ok(output_path)
}

/// List contents of a fastpack.
pub fn list(archive_path: &str) -> Result<()> {
    let loader = PackLoader::open(archive_path)
        .with_context(|| format!("Failed to open: {archive_path}"))?;

    println!("Header:");
    for (name, value) in loader.manifest() {
        println!("  {name}: {value}");
    }

    println!("\nDescriptor:");
    for line in loader.descriptor().lines() {
        println!("  {line}");
    }

    println!("\nFiles:");
    for file in loader.list_files() {
        println!("  {file}");
    }

    Ok(())
}
