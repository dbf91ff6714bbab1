//! Check command implementation.

use anyhow::{Context, Result};
use scenario_lint_core::{read_template, Analyzer};
use scenario_lint_rules::rules_from_config;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Exit status when a script could not be split into chapters.
const EXIT_PARSE_ERROR: i32 = 2;

/// Exit status when violations reach the `fail_on` severity.
const EXIT_VIOLATIONS: i32 = 1;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    template: Option<&Path>,
    source: &ConfigSource,
) -> Result<()> {
    let config = super::load_config(source)?;
    let fail_on = config.fail_on;

    let rules = match &rules_filter {
        Some(filter) => {
            let names: Vec<&str> = filter
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            rules_from_config(&config, Some(&names))
        }
        None => rules_from_config(&config, None),
    };

    let mut builder = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(exclude)
        .rules(rules);

    if let Some(template) = template {
        let base = if path.is_file() {
            path.parent().unwrap_or(Path::new("."))
        } else {
            path
        };
        // Absolute, so locations come out relative to the analysis root
        let base = std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(base);
        let files = read_template(template, &base)
            .with_context(|| format!("Failed to read template: {}", template.display()))?;
        tracing::info!("Template lists {} scripts", files.len());
        builder = builder.files(files);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    if result.has_parse_errors() {
        std::process::exit(EXIT_PARSE_ERROR);
    }
    if fail_on.is_some_and(|severity| result.has_violations_at(severity)) {
        std::process::exit(EXIT_VIOLATIONS);
    }

    Ok(())
}
