//! Rule presets and configuration-driven rule selection.

use crate::{
    anim_hold_balance, code_without_dialogue, control_characters, dialogue_quotes,
    empty_code_line, half_width_punctuation, nested_quotes, show_outside_trans,
    single_colon_quote, todo_marker,
};
use crate::{
    AnimHoldBalance, CodeWithoutDialogue, ControlCharacters, DialogueQuotes, EmptyCodeLine,
    HalfWidthPunctuation, NestedQuotes, ShowOutsideTrans, SingleColonQuote, TodoMarker,
};
use scenario_lint_core::{Config, RuleBox, RuleConfig, Severity};

/// Preset configurations for scenario-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Every rule, with informational rules raised to warnings.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown preset '{other}'")),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes every rule except `code-without-dialogue` (SL104).
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(AnimHoldBalance::new()),
        Box::new(ShowOutsideTrans::new()),
        Box::new(EmptyCodeLine::new()),
        Box::new(ControlCharacters::new()),
        Box::new(TodoMarker::new()),
        Box::new(DialogueQuotes::new()),
        Box::new(NestedQuotes::new()),
        Box::new(HalfWidthPunctuation::new()),
        Box::new(SingleColonQuote::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus:
/// - `code-without-dialogue` (SL104) at warning level
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    let mut rules = recommended_rules();
    rules.push(Box::new(
        CodeWithoutDialogue::new().severity(Severity::Warning),
    ));
    rules
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only the checks that catch broken playback:
/// - `anim-hold-balance` (SL101)
/// - `show-outside-trans` (SL102)
/// - `control-characters` (SL201)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(AnimHoldBalance::new()),
        Box::new(ShowOutsideTrans::new()),
        Box::new(ControlCharacters::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(AnimHoldBalance::new()),
        Box::new(ShowOutsideTrans::new()),
        Box::new(EmptyCodeLine::new()),
        Box::new(CodeWithoutDialogue::new()),
        Box::new(ControlCharacters::new()),
        Box::new(TodoMarker::new()),
        Box::new(DialogueQuotes::new()),
        Box::new(NestedQuotes::new()),
        Box::new(HalfWidthPunctuation::new()),
        Box::new(SingleColonQuote::new()),
    ]
}

/// Builds a rule from its name or code, applying its configuration section.
#[must_use]
pub fn rule_by_name(name: &str, config: Option<&RuleConfig>) -> Option<RuleBox> {
    let default_config = RuleConfig::default();
    let config = config.unwrap_or(&default_config);

    let rule: RuleBox = match name {
        anim_hold_balance::NAME | anim_hold_balance::CODE => Box::new(AnimHoldBalance::new()),
        show_outside_trans::NAME | show_outside_trans::CODE => {
            Box::new(ShowOutsideTrans::from_config(config))
        }
        empty_code_line::NAME | empty_code_line::CODE => Box::new(EmptyCodeLine::new()),
        code_without_dialogue::NAME | code_without_dialogue::CODE => {
            Box::new(CodeWithoutDialogue::new())
        }
        control_characters::NAME | control_characters::CODE => Box::new(ControlCharacters::new()),
        todo_marker::NAME | todo_marker::CODE => Box::new(TodoMarker::new()),
        dialogue_quotes::NAME | dialogue_quotes::CODE => Box::new(DialogueQuotes::new()),
        nested_quotes::NAME | nested_quotes::CODE => Box::new(NestedQuotes::new()),
        half_width_punctuation::NAME | half_width_punctuation::CODE => {
            Box::new(HalfWidthPunctuation::from_config(config))
        }
        single_colon_quote::NAME | single_colon_quote::CODE => Box::new(SingleColonQuote::new()),
        _ => return None,
    };
    Some(rule)
}

/// Selects the rules for a run.
///
/// With a `filter` of names or codes, exactly those rules are used. Otherwise
/// the configured preset (default: recommended) is used, plus any rule whose
/// section sets `enabled = true`. Rules with options are rebuilt from their
/// configuration section.
#[must_use]
pub fn rules_from_config(config: &Config, filter: Option<&[&str]>) -> Vec<RuleBox> {
    if let Some(names) = filter {
        return names
            .iter()
            .filter_map(|name| {
                let rule = rule_by_name(name, None).and_then(|rule| {
                    let section = config.rule_config(rule.name());
                    rule_by_name(rule.name(), section)
                });
                if rule.is_none() {
                    tracing::warn!("Unknown rule: {}", name);
                }
                rule
            })
            .collect();
    }

    let preset = match config.preset.as_deref().map(str::parse::<Preset>) {
        None => Preset::Recommended,
        Some(Ok(preset)) => preset,
        Some(Err(e)) => {
            tracing::warn!("{e}, using recommended");
            Preset::Recommended
        }
    };

    let mut rules: Vec<RuleBox> = preset
        .rules()
        .into_iter()
        .map(|rule| match config.rule_config(rule.name()) {
            Some(section) if !section.options.is_empty() => {
                rule_by_name(rule.name(), Some(section)).unwrap_or(rule)
            }
            _ => rule,
        })
        .collect();

    let mut extra: Vec<&String> = config
        .rules
        .iter()
        .filter(|(name, section)| {
            section.enabled == Some(true) && !rules.iter().any(|r| r.name() == name.as_str())
        })
        .map(|(name, _)| name)
        .collect();
    extra.sort();
    for name in extra {
        match rule_by_name(name, config.rule_config(name)) {
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert!(!Preset::Recommended.rules().is_empty());
        assert!(!Preset::Strict.rules().is_empty());
        assert!(!Preset::Minimal.rules().is_empty());
        assert_eq!(Preset::Strict.rules().len(), all_rules().len());
        assert_eq!("Strict".parse::<Preset>(), Ok(Preset::Strict));
        assert!("loose".parse::<Preset>().is_err());
    }

    #[test]
    fn test_rule_by_name_or_code() {
        for rule in all_rules() {
            let by_name = rule_by_name(rule.name(), None).unwrap();
            let by_code = rule_by_name(rule.code(), None).unwrap();
            assert_eq!(by_name.code(), rule.code());
            assert_eq!(by_code.name(), rule.name());
        }
        assert!(rule_by_name("no-such-rule", None).is_none());
    }

    #[test]
    fn test_rules_from_config() {
        let config = Config::parse(
            "preset = \"minimal\"\n[rules.code-without-dialogue]\nenabled = true\n",
        )
        .unwrap();
        assert_eq!(
            names(&rules_from_config(&config, None)),
            vec![
                "anim-hold-balance",
                "show-outside-trans",
                "control-characters",
                "code-without-dialogue"
            ]
        );

        let filtered = rules_from_config(&Config::default(), Some(&["SL205", "todo-marker", "nope"][..]));
        assert_eq!(names(&filtered), vec!["half-width-punctuation", "todo-marker"]);
    }
}
