//! # scenario-lint-rules
//!
//! Built-in lint rules for scenario-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SL101 | `anim-hold-balance` | Keeps `anim_hold_begin()` / `anim_hold_end()` balanced |
//! | SL102 | `show-outside-trans` | Flags `show()` made outside of a camera transition |
//! | SL103 | `empty-code-line` | Forbids empty lines inside code blocks |
//! | SL104 | `code-without-dialogue` | Reports code blocks with no dialogue |
//! | SL201 | `control-characters` | Forbids control characters in dialogue |
//! | SL202 | `todo-marker` | Reports TODO markers in dialogue |
//! | SL203 | `dialogue-quotes` | Requires named dialogue to be quoted |
//! | SL204 | `nested-quotes` | Flags quotes reopened while open |
//! | SL205 | `half-width-punctuation` | Forbids half-width punctuation |
//! | SL206 | `single-colon-quote` | Flags speech written with a single colon |
//!
//! SL001 (`code-parse`) is reported by the analyzer itself.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod anim_hold_balance;
pub mod code_without_dialogue;
pub mod control_characters;
pub mod dialogue_quotes;
pub mod empty_code_line;
pub mod half_width_punctuation;
pub mod nested_quotes;
pub mod presets;
pub mod show_outside_trans;
pub mod single_colon_quote;
pub mod todo_marker;

#[cfg(test)]
mod testing;

pub use anim_hold_balance::AnimHoldBalance;
pub use code_without_dialogue::CodeWithoutDialogue;
pub use control_characters::ControlCharacters;
pub use dialogue_quotes::DialogueQuotes;
pub use empty_code_line::EmptyCodeLine;
pub use half_width_punctuation::HalfWidthPunctuation;
pub use nested_quotes::NestedQuotes;
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, rules_from_config, strict_rules,
    Preset,
};
pub use show_outside_trans::{ShowOutsideTrans, ShowOutsideTransConfig};
pub use single_colon_quote::SingleColonQuote;
pub use todo_marker::TodoMarker;

// Re-export core types for convenience
pub use scenario_lint_core::{Rule, RuleBox, Severity, Violation};
