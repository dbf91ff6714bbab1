//! scenario-lint CLI tool.
//!
//! Usage:
//! ```bash
//! scenario-lint check [OPTIONS] [PATH]
//! scenario-lint list-rules
//! scenario-lint init
//! scenario-lint dump [--no-code] FILE
//! scenario-lint list-resources FILE
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use config_resolver::ConfigResolver;

/// Linter for scenario scripts with embedded Lua code
#[derive(Parser)]
#[command(name = "scenario-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// File or directory to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lint the scripts listed by `@include` lines of this template, in order
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Re-serialize a script in canonical form
    Dump {
        /// Script to dump
        file: PathBuf,

        /// Print reader-visible dialogue only
        #[arg(long)]
        no_code: bool,
    },

    /// List backgrounds and music used by a script
    ListResources {
        /// Script to inspect
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let resolver = ConfigResolver::from_env();
    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            template,
        } => {
            // A template's scripts share the template's project
            let target = template
                .as_deref()
                .and_then(Path::parent)
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(path.as_path());
            let source = resolver.resolve(target, config_path);
            commands::check::run(&path, format, rules, exclude, template.as_deref(), &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
        Commands::Dump { file, no_code } => commands::dump::run(&file, no_code),
        Commands::ListResources { file, json } => {
            let source = resolver.resolve(&file, config_path);
            commands::list_resources::run(&file, json, &source)
        }
    }
}
