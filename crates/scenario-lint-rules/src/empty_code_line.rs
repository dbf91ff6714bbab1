//! Rule to forbid blank lines inside code blocks.
//!
//! A blank line reads as an entry separator to anyone skimming the script,
//! even though the parser keeps it inside the block.

use scenario_lint_core::{ChapterContext, Rule, Severity, Violation};

/// Rule code for empty-code-line.
pub const CODE: &str = "SL103";

/// Rule name for empty-code-line.
pub const NAME: &str = "empty-code-line";

/// Flags code blocks containing empty lines.
#[derive(Debug, Clone)]
pub struct EmptyCodeLine {
    severity: Severity,
}

impl Default for EmptyCodeLine {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptyCodeLine {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for EmptyCodeLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids empty lines inside code blocks"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .filter(|e| e.entry.has_code() && e.entry.code.lines().any(str::is_empty))
            .map(|e| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(e),
                    "empty line in code block",
                )
            })
            .collect()
    }
}
