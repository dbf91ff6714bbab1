//! Rule trait for defining lint rules.

use crate::context::ChapterContext;
use crate::types::{Severity, Violation};

/// A per-chapter lint rule.
///
/// Rules receive one chapter at a time with every entry already walked, so
/// state threaded across entries lives in locals of `check` and starts fresh
/// for each chapter.
///
/// # Example
///
/// ```
/// use scenario_lint_core::{ChapterContext, Rule, Severity, Violation};
///
/// pub struct NoStop;
///
/// impl Rule for NoStop {
///     fn name(&self) -> &'static str { "no-stop" }
///     fn code(&self) -> &'static str { "SL900" }
///
///     fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
///         ctx.entries
///             .iter()
///             .filter(|e| e.events.iter().any(|ev| ev.name == "stop"))
///             .map(|e| {
///                 Violation::new(
///                     self.code(),
///                     self.name(),
///                     self.default_severity(),
///                     ctx.location(e),
///                     "stop() called",
///                 )
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "anim-hold-balance").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SL101").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks one chapter and returns any violations found.
    fn check(&self, ctx: &ChapterContext) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, _ctx: &ChapterContext) -> Vec<Violation> {
            Vec::new()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert!(!rule.requires_allow_reason());
    }
}
