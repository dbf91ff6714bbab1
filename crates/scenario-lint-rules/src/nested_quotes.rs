//! Rule to catch a quotation mark opened while the same kind is still open.
//!
//! `““` or `‘‘` almost always means a closing mark was typed the wrong way
//! round. Inner quotes should alternate kinds.

use scenario_lint_core::script::{normalize_dialogue, NormalizeOptions};
use scenario_lint_core::{ChapterContext, Rule, Severity, Suggestion, Violation};

/// Rule code for nested-quotes.
pub const CODE: &str = "SL204";

/// Rule name for nested-quotes.
pub const NAME: &str = "nested-quotes";

const QUOTE_PAIRS: [(char, char); 2] = [('“', '”'), ('‘', '’')];

/// Flags a quotation mark opened inside a quote of the same kind.
#[derive(Debug, Clone)]
pub struct NestedQuotes {
    severity: Severity,
}

impl Default for NestedQuotes {
    fn default() -> Self {
        Self::new()
    }
}

impl NestedQuotes {
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

/// Opening marks that were reopened before being closed, in order found.
fn reopened_marks(text: &str) -> Vec<char> {
    let mut open = [false; QUOTE_PAIRS.len()];
    let mut found = Vec::new();

    for c in text.chars() {
        for (i, &(opening, closing)) in QUOTE_PAIRS.iter().enumerate() {
            if c == opening {
                if open[i] && !found.contains(&opening) {
                    found.push(opening);
                }
                open[i] = true;
            } else if c == closing {
                open[i] = false;
            }
        }
    }
    found
}

impl Rule for NestedQuotes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags quotation marks opened while the same kind is open"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for entry in &ctx.entries {
            let Some(dialogue) = entry.entry.dialogue.as_deref() else {
                continue;
            };
            let text = normalize_dialogue(dialogue, NormalizeOptions::default());
            for mark in reopened_marks(&text) {
                violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        ctx.location(entry),
                        format!("nested quotation mark {mark}"),
                    )
                    .with_suggestion(Suggestion::new(
                        "Close the outer quote first, or alternate “” with ‘’",
                    )),
                );
            }
        }
        violations
    }
}
