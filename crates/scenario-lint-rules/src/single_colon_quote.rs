//! Rule to catch speech written with a single full-width colon.
//!
//! `爱丽丝：“你好。”` looks like a named line but the parser needs `：：`,
//! so the text ends up as narration.

use regex::Regex;
use scenario_lint_core::script::{normalize_dialogue, NormalizeOptions};
use scenario_lint_core::{ChapterContext, Rule, Severity, Suggestion, Violation};
use std::sync::OnceLock;

/// Rule code for single-colon-quote.
pub const CODE: &str = "SL206";

/// Rule name for single-colon-quote.
pub const NAME: &str = "single-colon-quote";

#[allow(clippy::expect_used)]
fn single_colon_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^.*?：“.*?”$").expect("valid regex"))
}

/// Flags narration that looks like speech with a single colon.
#[derive(Debug, Clone)]
pub struct SingleColonQuote {
    severity: Severity,
}

impl Default for SingleColonQuote {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleColonQuote {
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

impl Rule for SingleColonQuote {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags narration written as speech with a single colon"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .filter(|e| e.entry.character_name.is_none())
            .filter(|e| {
                e.entry.dialogue.as_deref().is_some_and(|d| {
                    single_colon_regex()
                        .is_match(&normalize_dialogue(d, NormalizeOptions::default()))
                })
            })
            .map(|e| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(e),
                    "quote with single colon",
                )
                .with_suggestion(Suggestion::new("Use '：：' to name the speaker"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chapter, check_script, messages};

    #[test]
    fn test_single_colon() {
        let violations = check_script(&SingleColonQuote::new(), &chapter("爱丽丝：“你好。”"));
        assert_eq!(messages(&violations), vec!["quote with single colon"]);
    }

    #[test]
    fn test_named_and_plain_lines() {
        let rule = SingleColonQuote::new();
        assert!(check_script(&rule, &chapter("爱丽丝：：“你好。”")).is_empty());
        assert!(check_script(&rule, &chapter("时间：晚上。")).is_empty());
        assert!(check_script(&rule, &chapter("她说：“你好。”然后离开了。")).is_empty());
    }
}
