//! Configuration module for aggregator-rs
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "AGGREGATOR_SETTINGS_PATH";

/// Candidate settings files, in lookup order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/aggregator/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("aggregator-rs/settings.yml"));
    }
    paths
}

/// First existing settings file, honouring `AGGREGATOR_SETTINGS_PATH`
pub fn locate() -> Option<PathBuf> {
    let explicit = std::env::var(SETTINGS_PATH_ENV).ok().map(PathBuf::from);
    let mut candidates = default_paths();
    if let Some(path) = explicit {
        candidates.insert(0, path);
    }
    candidates.into_iter().find(|path| path.exists())
}

/// Load settings from `path`, or use defaults, then apply the environment
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}
