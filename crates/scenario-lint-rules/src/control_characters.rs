//! Rule to forbid control characters in dialogue.
//!
//! Control characters pasted in from other tools are invisible in most
//! editors and render as boxes in game. Newlines and tabs are allowed.

use scenario_lint_core::{ChapterContext, Rule, Severity, Suggestion, Violation};

/// Rule code for control-characters.
pub const CODE: &str = "SL201";

/// Rule name for control-characters.
pub const NAME: &str = "control-characters";

/// Flags dialogue containing control characters.
#[derive(Debug, Clone)]
pub struct ControlCharacters {
    severity: Severity,
}

impl Default for ControlCharacters {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlCharacters {
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

fn first_control_character(text: &str) -> Option<char> {
    text.chars()
        .find(|c| c.is_control() && !matches!(c, '\n' | '\t'))
}

impl Rule for ControlCharacters {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids control characters in dialogue"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .filter_map(|e| {
                let c = first_control_character(e.entry.dialogue.as_deref()?)?;
                Some(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        ctx.location(e),
                        format!("control character U+{:04X} in dialogue", u32::from(c)),
                    )
                    .with_suggestion(Suggestion::new("Delete the invisible character")),
                )
            })
            .collect()
    }
}
