//! # scenario-lint-core
//!
//! Core framework for linting scenario scripts: text that interleaves
//! dialogue with embedded Lua code blocks.
//!
//! This crate provides:
//!
//! - [`script`]: the chapter state machine, serializer and dialogue helpers
//! - [`walker`]: the call-graph walker producing [`InvocationEvent`]s
//! - [`Rule`] trait for per-chapter rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```
//! use scenario_lint_core::script::parse_script;
//!
//! let chapters = parse_script("@<|label('ch1')|>\nAlice::“Hello.”\n@<||>").unwrap();
//! assert_eq!(chapters[0].name, "ch1");
//! assert_eq!(chapters[0].entries[0].character_name.as_deref(), Some("Alice"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod inventory;
mod rule;
mod types;

pub mod script;
/// Utility modules for rule implementations.
pub mod utils;
pub mod walker;

pub use analyzer::{read_template, Analyzer, AnalyzerBuilder, AnalyzerError};
pub use analyzer::{CODE_PARSE_CODE, CODE_PARSE_NAME};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, CONFIG_FILE_NAME};
pub use context::{AnalyzedEntry, ChapterContext, FileContext};
pub use inventory::ResourceInventory;
pub use rule::{Rule, RuleBox};
pub use types::{LintResult, Location, ParseFailure, Severity, Suggestion, Violation};
pub use walker::{ArgumentValue, InvocationEvent, LexicalContext, WalkerOptions};
