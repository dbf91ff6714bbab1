//! Helpers shared by rule tests.

use scenario_lint_core::script::parse_script;
use scenario_lint_core::{ChapterContext, FileContext, Rule, Violation, WalkerOptions};
use std::path::Path;

/// Runs `rule` over every chapter of `script`.
pub fn check_script(rule: &dyn Rule, script: &str) -> Vec<Violation> {
    let chapters = parse_script(script).unwrap();
    let file = FileContext::new(Path::new("test.txt"), script, Path::new("."));
    let options = WalkerOptions::default();
    chapters
        .iter()
        .flat_map(|chapter| rule.check(&ChapterContext::new(&file, chapter, &options)))
        .collect()
}

/// Wraps `body` in a single chapter named `test`.
pub fn chapter(body: &str) -> String {
    format!("@<|label('test')|>\n{body}\n@<||>\n")
}

/// Messages of `violations`, in order.
pub fn messages(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.message.as_str()).collect()
}
