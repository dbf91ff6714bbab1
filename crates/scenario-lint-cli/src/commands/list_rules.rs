//! List rules command implementation.

use scenario_lint_core::{CODE_PARSE_CODE, CODE_PARSE_NAME};
use scenario_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(90));

    println!(
        "{:<10} {:<25} {:<9} Code block failed to parse (reported by the analyzer)",
        CODE_PARSE_CODE, CODE_PARSE_NAME, "error"
    );
    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - All rules except SL104 (default)");
    println!("  strict       - All rules, SL104 raised to warning");
    println!("  minimal      - SL101, SL102, SL201 (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  scenario-lint check --rules anim-hold-balance,show-outside-trans");
    println!("  scenario-lint check --rules SL101,SL203,SL205");
}
