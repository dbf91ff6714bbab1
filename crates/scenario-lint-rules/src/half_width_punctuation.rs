//! Rule to forbid half-width punctuation in dialogue.
//!
//! # Rationale
//!
//! Scripts are written with full-width punctuation; a stray `,` or `.` left
//! by an input method breaks the typesetting.
//!
//! Quoted spans made only of ASCII, such as `“Hello.”`, are treated as
//! foreign-language quotations and are not checked.
//!
//! # Configuration
//!
//! - `characters`: Characters to flag (default: `,.?!;:'"()`)

use scenario_lint_core::script::{normalize_dialogue, NormalizeOptions};
use scenario_lint_core::{ChapterContext, Rule, RuleConfig, Severity, Suggestion, Violation};

/// Rule code for half-width-punctuation.
pub const CODE: &str = "SL205";

/// Rule name for half-width-punctuation.
pub const NAME: &str = "half-width-punctuation";

const DEFAULT_CHARACTERS: &str = ",.?!;:'\"()";

/// Flags half-width punctuation in dialogue.
#[derive(Debug, Clone)]
pub struct HalfWidthPunctuation {
    characters: String,
    severity: Severity,
}

impl Default for HalfWidthPunctuation {
    fn default() -> Self {
        Self::new()
    }
}

impl HalfWidthPunctuation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            characters: DEFAULT_CHARACTERS.to_string(),
            severity: Severity::Warning,
        }
    }

    /// Creates a rule from its configuration section.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().characters(config.get_str("characters", DEFAULT_CHARACTERS))
    }

    /// Sets the characters to flag.
    #[must_use]
    pub fn characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = characters.into();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn find(&self, dialogue: &str) -> Option<char> {
        let text = normalize_dialogue(dialogue, NormalizeOptions::default());
        without_ascii_quotations(&text)
            .chars()
            .find(|c| self.characters.contains(*c))
    }
}

/// Drops `“...”` spans whose content is entirely ASCII.
fn without_ascii_quotations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('“') {
        out.push_str(&rest[..start]);
        let after = &rest[start + '“'.len_utf8()..];
        match after.find('”') {
            Some(end) if after[..end].is_ascii() => {
                rest = &after[end + '”'.len_utf8()..];
            }
            _ => {
                out.push('“');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

impl Rule for HalfWidthPunctuation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids half-width punctuation in dialogue"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .filter_map(|e| {
                let c = self.find(e.entry.dialogue.as_deref()?)?;
                Some(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        ctx.location(e),
                        "half width punctuation",
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "Replace '{c}' with its full-width form"
                    ))),
                )
            })
            .collect()
    }
}
