//! Rule to point out entries that run code but say nothing.
//!
//! Such entries are legal, and common right before a chapter ends, so the
//! rule reports them as information only.

use scenario_lint_core::{ChapterContext, Rule, Severity, Violation};

/// Rule code for code-without-dialogue.
pub const CODE: &str = "SL104";

/// Rule name for code-without-dialogue.
pub const NAME: &str = "code-without-dialogue";

/// Reports entries with code and no dialogue.
#[derive(Debug, Clone)]
pub struct CodeWithoutDialogue {
    severity: Severity,
}

impl Default for CodeWithoutDialogue {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWithoutDialogue {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Info,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for CodeWithoutDialogue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports code blocks that have no dialogue"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .filter(|e| e.entry.has_code() && e.entry.dialogue.is_none())
            .map(|e| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(e),
                    "code block with empty dialogue",
                )
            })
            .collect()
    }
}
