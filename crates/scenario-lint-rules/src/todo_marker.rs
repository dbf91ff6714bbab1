//! Rule to surface TODO markers left in dialogue.
//!
//! Writers annotate unfinished lines as `（TODO：topic：note）`. The topic is
//! echoed in the message; a bare `TODO` is reported without one.

use regex::Regex;
use scenario_lint_core::script::{normalize_dialogue, NormalizeOptions};
use scenario_lint_core::{ChapterContext, Rule, Severity, Violation};
use std::sync::OnceLock;

/// Rule code for todo-marker.
pub const CODE: &str = "SL202";

/// Rule name for todo-marker.
pub const NAME: &str = "todo-marker";

#[allow(clippy::expect_used)]
fn todo_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("（TODO：(.*?)：.*?）").expect("valid regex"))
}

/// Reports TODO markers in dialogue.
#[derive(Debug, Clone)]
pub struct TodoMarker {
    severity: Severity,
}

impl Default for TodoMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoMarker {
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

fn todo_message(dialogue: &str) -> Option<String> {
    let text = normalize_dialogue(
        dialogue,
        NormalizeOptions {
            remove_todo: false,
            ..NormalizeOptions::default()
        },
    );
    if let Some(caps) = todo_regex().captures(&text) {
        Some(format!("TODO: {} found", &caps[1]))
    } else if text.contains("TODO") {
        Some("TODO found".to_string())
    } else {
        None
    }
}

impl Rule for TodoMarker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports TODO markers left in dialogue"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .filter_map(|e| {
                let message = todo_message(e.entry.dialogue.as_deref()?)?;
                Some(Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(e),
                    message,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chapter, check_script, messages};

    #[test]
    fn test_todo_topics() {
        assert_eq!(
            todo_message("“Hi.”（TODO：voice：record again）").as_deref(),
            Some("TODO: voice found")
        );
        assert_eq!(todo_message("TODO rewrite").as_deref(), Some("TODO found"));
        assert_eq!(todo_message("Nothing to do."), None);
    }

    #[test]
    fn test_reports_per_entry() {
        let script = chapter("First （TODO：cg：missing）\n\nSecond\n\nTODO");
        let violations = check_script(&TodoMarker::new(), &script);
        assert_eq!(messages(&violations), vec!["TODO: cg found", "TODO found"]);
        assert_eq!(violations[1].location.line, 6);
    }
}
