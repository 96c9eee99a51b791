//! Configuration management
//!
//! Supports configuration loading with precedence: CLI > env > file > defaults.
//! This module covers env and file; the binary applies CLI flags on top.

mod builder;
mod env;
mod file;

pub use builder::{Config, ConfigBuilder, LintConfig, TelemetryConfig, TransportConfig};

use crate::Result;

/// Load configuration with precedence: env > file > defaults
pub fn load_config() -> Result<ConfigBuilder> {
    let mut builder = ConfigBuilder::new();

    if let Some(path) = file::find_config_file() {
        tracing::info!("Loading configuration from {}", path.display());
        builder = file::load_from_file(&path, builder)?;
    }

    builder = env::load_from_env(builder);

    Ok(builder)
}

/// Load configuration from a specific file path
pub fn load_config_from_path(path: &std::path::Path) -> Result<ConfigBuilder> {
    tracing::info!("Loading configuration from {}", path.display());
    let builder = file::load_from_file(path, ConfigBuilder::new())?;

    Ok(env::load_from_env(builder))
}

/// Split a comma-separated list, dropping blank entries
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
