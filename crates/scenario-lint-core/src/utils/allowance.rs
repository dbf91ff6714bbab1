//! Comment-based allowance directives.
//!
//! An entry's code may carry Lua comments such as:
//! ```text
//! -- scenario-lint: allow(show-outside-trans) reason="camera cut is intended"
//! ```
//! Directives apply to the whole entry they appear in.

use std::collections::HashSet;

/// Rule name that matches every rule.
pub const ALLOW_ALL: &str = "all";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule names that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

/// All directives found in one entry's code.
#[derive(Debug, Clone, Default)]
pub struct Allowances {
    directives: Vec<AllowDirective>,
}

impl Allowances {
    /// Collects directives from every comment line of `code`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self {
            directives: code.lines().filter_map(parse_allow_directive).collect(),
        }
    }

    /// Returns true if no directive was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Checks whether `rule_name` is allowed, returning the first match.
    #[must_use]
    pub fn check(&self, rule_name: &str) -> AllowCheck {
        self.directives
            .iter()
            .find(|d| d.rules.contains(rule_name) || d.rules.contains(ALLOW_ALL))
            .map_or(AllowCheck::Denied, |d| AllowCheck::Allowed {
                reason: d.reason.clone(),
            })
    }
}

/// Parses an allowance directive from a code line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let line = line.trim();

    // The directive must be the only thing on its line
    let comment_content = line.strip_prefix("--")?.trim();

    let directive = comment_content.strip_prefix("scenario-lint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("-- scenario-lint: allow(todo-marker)").unwrap();
        assert!(directive.rules.contains("todo-marker"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive = parse_allow_directive(
            "--scenario-lint: allow(show-outside-trans, empty-code-line) reason=\"cut scene\"",
        )
        .unwrap();
        assert!(directive.rules.contains("show-outside-trans"));
        assert!(directive.rules.contains("empty-code-line"));
        assert_eq!(directive.reason.as_deref(), Some("cut scene"));
    }

    #[test]
    fn test_non_directives_are_ignored() {
        assert!(parse_allow_directive("show(bg, 'x') -- scenario-lint: allow(all)").is_none());
        assert!(parse_allow_directive("-- scenario-lint: allow()").is_none());
        assert!(parse_allow_directive("-- just a note").is_none());
    }

    #[test]
    fn test_allowances_from_code() {
        let code = "show(bg, 'room')\n-- scenario-lint: allow(all) reason=\"draft\"\nwait(1)";
        let allowances = Allowances::from_code(code);
        let check = allowances.check("anim-hold-balance");
        assert!(check.is_allowed());
        assert_eq!(check.reason(), Some("draft"));

        let none = Allowances::from_code("show(bg, 'room')");
        assert!(none.is_empty());
        assert_eq!(none.check("anim-hold-balance"), AllowCheck::Denied);
    }
}
