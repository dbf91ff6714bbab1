//! Rule to require quotation marks around spoken lines.
//!
//! A named entry is speech, so its visible text must open with `“` and close
//! with `”`. Markup and notes are stripped before checking.

use scenario_lint_core::script::{normalize_dialogue, NormalizeOptions};
use scenario_lint_core::{AnalyzedEntry, ChapterContext, Rule, Severity, Violation};

/// Rule code for dialogue-quotes.
pub const CODE: &str = "SL203";

/// Rule name for dialogue-quotes.
pub const NAME: &str = "dialogue-quotes";

const OPENING: char = '“';
const CLOSING: char = '”';

/// Requires named dialogue to be quoted.
#[derive(Debug, Clone)]
pub struct DialogueQuotes {
    severity: Severity,
}

impl Default for DialogueQuotes {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueQuotes {
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

    fn check_entry(&self, ctx: &ChapterContext, entry: &AnalyzedEntry<'_>) -> Vec<Violation> {
        let (Some(_), Some(dialogue)) = (&entry.entry.character_name, &entry.entry.dialogue)
        else {
            return Vec::new();
        };
        let text = normalize_dialogue(dialogue, NormalizeOptions::default());

        let mut violations = Vec::new();
        if !text.starts_with(OPENING) {
            violations.push(Violation::new(
                CODE,
                NAME,
                self.severity,
                ctx.location(entry),
                "dialogue missing opening quotation mark",
            ));
        }
        if !text.ends_with(CLOSING) {
            violations.push(Violation::new(
                CODE,
                NAME,
                self.severity,
                ctx.location(entry),
                "dialogue missing closing quotation mark",
            ));
        }
        violations
    }
}

impl Rule for DialogueQuotes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires named dialogue to start with “ and end with ”"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .flat_map(|entry| self.check_entry(ctx, entry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chapter, check_script, messages};

    fn check(body: &str) -> Vec<Violation> {
        check_script(&DialogueQuotes::new(), &chapter(body))
    }

    #[test]
    fn test_quoted_dialogue() {
        assert!(check("Alice::“Hello.”").is_empty());
        assert!(check("Alice::<color=red>“Hello.”</color>").is_empty());
    }

    #[test]
    fn test_unquoted_dialogue() {
        assert_eq!(
            messages(&check("Bob::Hello.")),
            vec![
                "dialogue missing opening quotation mark",
                "dialogue missing closing quotation mark"
            ]
        );
        assert_eq!(
            messages(&check("Bob::“Hello.")),
            vec!["dialogue missing closing quotation mark"]
        );
    }

    #[test]
    fn test_narration_is_not_checked() {
        assert!(check("The door creaked.").is_empty());
    }
}
