//! Rule to keep `anim_hold_begin()` / `anim_hold_end()` balanced.
//!
//! # Rationale
//!
//! Held animations survive across entries until `anim_hold_end()` is called.
//! A second `anim_hold_begin()` or an `anim_hold_end()` with nothing open
//! means the script lost track of which animations are still running.
//!
//! # Detected Patterns
//!
//! - `anim_hold_begin()` while a hold is already open
//! - `anim_hold_end()` while no hold is open
//! - `anim_hold` used while no hold is open
//! - `anim_hold` at top level after a begin or end nested in a closure of the same entry
//! - `anim_hold` nested inside another `anim_hold` chain
//!
//! The tracker is per chapter and starts closed.

use scenario_lint_core::{ChapterContext, Rule, Severity, Suggestion, Violation};

/// Rule code for anim-hold-balance.
pub const CODE: &str = "SL101";

/// Rule name for anim-hold-balance.
pub const NAME: &str = "anim-hold-balance";

const BEGIN: &str = "anim_hold_begin";
const END: &str = "anim_hold_end";
const HOLD: &str = "anim_hold";

/// Tracks held animation blocks across the entries of a chapter.
#[derive(Debug, Clone)]
pub struct AnimHoldBalance {
    severity: Severity,
}

impl Default for AnimHoldBalance {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimHoldBalance {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for AnimHoldBalance {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Keeps anim_hold_begin() and anim_hold_end() balanced"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut open = false;

        for entry in &ctx.entries {
            let mut overridden = false;
            let report = |violations: &mut Vec<Violation>, message: &str| {
                violations.push(Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(entry),
                    message,
                ));
            };

            for event in &entry.events {
                let nested = !event.lexical_context.is_empty();
                match event.name.as_str() {
                    BEGIN => {
                        if open {
                            let v = Violation::new(
                                CODE,
                                NAME,
                                self.severity,
                                ctx.location(entry),
                                "anim_hold_begin() not match",
                            )
                            .with_suggestion(Suggestion::new(
                                "Close the previous hold with anim_hold_end() first",
                            ));
                            violations.push(v);
                        }
                        open = true;
                        overridden |= nested;
                    }
                    END => {
                        if open {
                            open = false;
                        } else {
                            report(&mut violations, "anim_hold_end() not match");
                        }
                        overridden |= nested;
                    }
                    HOLD => {
                        if event.lexical_context.contains(HOLD) {
                            report(&mut violations, "anim_hold in anim_hold");
                        }
                        if !open {
                            report(&mut violations, "anim_hold not tracked");
                        }
                        if overridden && !nested {
                            report(
                                &mut violations,
                                "anim_hold overridden by anim_hold_begin() or anim_hold_end()",
                            );
                        }
                    }
                    _ => {}
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chapter, check_script, messages};

    fn check(body: &str) -> Vec<Violation> {
        check_script(&AnimHoldBalance::new(), &chapter(body))
    }

    #[test]
    fn test_balanced_hold_is_clean() {
        let body = "<|\nanim_hold_begin()\nanim_hold:move(cam, {0, 1}, 1)\n|>\nOne.\n\n\
                    <|\nanim_hold_end()\n|>\nTwo.";
        assert!(check(body).is_empty());
    }

    #[test]
    fn test_double_begin_reports_once() {
        let body = "<|anim_hold_begin()|>\nOne.\n\n<|anim_hold_begin()|>\nTwo.";
        let violations = check(body);
        assert_eq!(messages(&violations), vec!["anim_hold_begin() not match"]);
        assert_eq!(violations[0].location.line, 5);
        assert!(violations[0].suggestion.is_some());
    }

    #[test]
    fn test_end_without_begin() {
        let violations = check("<|anim_hold_end()|>\nDone.");
        assert_eq!(messages(&violations), vec!["anim_hold_end() not match"]);
    }

    #[test]
    fn test_hold_without_begin() {
        let violations = check("<|anim_hold:move(cam, {0, 1}, 1)|>\nMove.");
        assert_eq!(messages(&violations), vec!["anim_hold not tracked"]);
    }

    #[test]
    fn test_nested_begin_overrides_later_hold() {
        let body = "<|\nanim:action(function() anim_hold_begin() end)\nanim_hold:move(cam, {0, 1}, 1)\n|>\nMove.";
        let violations = check(body);
        assert_eq!(
            messages(&violations),
            vec!["anim_hold overridden by anim_hold_begin() or anim_hold_end()"]
        );
    }

    #[test]
    fn test_hold_inside_hold() {
        let body = "<|\nanim_hold_begin()\nanim_hold:action(function() anim_hold:move(cam, {0, 1}, 1) end)\nanim_hold_end()\n|>\nMove.";
        let violations = check(body);
        assert_eq!(messages(&violations), vec!["anim_hold in anim_hold"]);
    }

    #[test]
    fn test_tracker_resets_per_chapter() {
        let script = "@<|label('a')|>\n<|anim_hold_begin()|>\nOne.\n@<||>\n\n\
                      @<|label('b')|>\n<|anim_hold:move(cam, {0, 1}, 1)|>\nTwo.\n@<||>\n";
        let violations = check_script(&AnimHoldBalance::new(), script);
        assert_eq!(messages(&violations), vec!["anim_hold not tracked"]);
    }

    #[test]
    fn test_error_severity_by_default() {
        let rule = AnimHoldBalance::new();
        assert_eq!(rule.default_severity(), Severity::Error);
        assert!(rule.requires_allow_reason());
        let rule = rule.severity(Severity::Warning);
        assert_eq!(rule.default_severity(), Severity::Warning);
    }
}
