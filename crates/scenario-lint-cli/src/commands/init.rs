//! Init command implementation.

use anyhow::{bail, Result};
use scenario_lint_core::CONFIG_FILE_NAME;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# scenario-lint configuration

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Fail `check` when a violation reaches this severity
# fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./Scenarios"

# File extensions treated as scenario scripts
extensions = ["txt"]

# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
    "**/drafts/**",
]

# Respect .gitignore files
respect_gitignore = true

[walker]
# Chain methods whose first argument names the action being applied
wrapper_calls = ["action"]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.show-outside-trans]
enabled = true
# severity = "error"  # Override default severity
wait_threshold = 0.1
exempt_layers = ["bg", "fg", "ui_image"]
trigger_calls = ["anim", "anim_hold"]

[rules.half-width-punctuation]
enabled = true
# characters = ",.?!;:'\"()"

# [rules.code-without-dialogue]
# enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {CONFIG_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: scenario-lint check");

    Ok(())
}
