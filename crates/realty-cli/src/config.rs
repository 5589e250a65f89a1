//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use realty_core::config::{CliConfigOverrides, LayeredConfig, CONFIG_FILE_NAME};
use std::path::Path;

/// Load layered configuration from `realty.toml` in `dir`, the environment,
/// and CLI overrides, in increasing precedence
pub fn load_config(dir: &Path, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    let mut config = LayeredConfig::with_defaults()
        .load_from_optional_file(&config_path)
        .with_context(|| format!("Failed to load configuration file {}", config_path.display()))?
        .load_from_env();

    config.update_from_cli(overrides);
    Ok(config)
}

/// Load configuration relative to the current directory
pub fn load_current_config(overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    load_config(&cwd, overrides)
}
