//! CLI subcommands.

pub mod check;
pub mod dump;
pub mod init;
pub mod list_resources;
pub mod list_rules;
pub mod output;

use crate::config_resolver::ConfigSource;
use anyhow::{Context, Result};
use scenario_lint_core::script::{parse_script, Chapter};
use scenario_lint_core::{Config, ParseFailure};
use std::path::Path;

/// Loads the configuration a resolver pointed at.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    tracing::debug!("Configuration: {source}");
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if matches!(source, ConfigSource::Global(_)) {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Reads and parses one script, rendering structural errors and exiting with 2.
pub fn read_chapters(file: &Path) -> Result<Vec<Chapter>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    match parse_script(&content) {
        Ok(chapters) => Ok(chapters),
        Err(e) => {
            output::print_parse_failure(&ParseFailure::new(file.to_path_buf(), e, content));
            std::process::exit(2);
        }
    }
}
