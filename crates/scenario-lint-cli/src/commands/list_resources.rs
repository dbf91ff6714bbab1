//! List-resources command implementation.

use anyhow::Result;
use scenario_lint_core::ResourceInventory;
use std::path::Path;

use crate::config_resolver::ConfigSource;

/// Runs the list-resources command.
pub fn run(file: &Path, json: bool, source: &ConfigSource) -> Result<()> {
    let config = super::load_config(source)?;
    let chapters = super::read_chapters(file)?;
    let inventory = ResourceInventory::collect(&chapters, &config.walker);

    if json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    println!("Backgrounds:");
    for name in &inventory.backgrounds {
        println!("  {name}");
    }
    println!("\nBGM:");
    for name in &inventory.bgm {
        println!("  {name}");
    }
    Ok(())
}
