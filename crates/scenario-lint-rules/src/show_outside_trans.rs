//! Rule to catch `show()` calls that run outside of a camera transition.
//!
//! # Rationale
//!
//! An entry that both shows a new image and starts a camera transition
//! without waiting in between makes the image pop in before the transition
//! captures the old frame.
//!
//! # Detected Patterns
//!
//! Within one code block:
//!
//! - a top-level `show(layer, ...)` where `layer` is not an exempt layer, and
//! - a call whose name contains `trans`, with the camera as first argument and
//!   a non-nil second argument, issued while less than `wait_threshold`
//!   seconds of `wait()` have passed since the block start or the last
//!   animation trigger.
//!
//! # Configuration
//!
//! - `wait_threshold`: Seconds of waiting that separate the two (default: 0.1)
//! - `exempt_layers`: Layers `show()` may target freely (default: `["bg", "fg", "ui_image"]`)
//! - `trigger_calls`: Calls that reset the wait counter (default: `["anim", "anim_hold"]`)
//! - `camera`: Name of the camera object (default: `"cam"`)

use scenario_lint_core::{
    AnalyzedEntry, ChapterContext, InvocationEvent, Rule, RuleConfig, Severity, Suggestion,
    Violation,
};

/// Rule code for show-outside-trans.
pub const CODE: &str = "SL102";

/// Rule name for show-outside-trans.
pub const NAME: &str = "show-outside-trans";

const SHOW_CALL: &str = "show";
const WAIT_CALL: &str = "wait";
const TRANS_MARKER: &str = "trans";

/// Configuration for the show/transition check.
#[derive(Debug, Clone)]
pub struct ShowOutsideTransConfig {
    /// Waiting time that separates a show from a transition.
    pub wait_threshold: f64,
    /// Layers exempt from the check.
    pub exempt_layers: Vec<String>,
    /// Calls that reset the wait counter.
    pub trigger_calls: Vec<String>,
    /// Name of the camera object.
    pub camera: String,
}

impl Default for ShowOutsideTransConfig {
    fn default() -> Self {
        Self {
            wait_threshold: 0.1,
            exempt_layers: ["bg", "fg", "ui_image"].map(String::from).to_vec(),
            trigger_calls: ["anim", "anim_hold"].map(String::from).to_vec(),
            camera: "cam".to_string(),
        }
    }
}

/// Flags code blocks that show an image and start a transition together.
#[derive(Debug, Clone)]
pub struct ShowOutsideTrans {
    config: ShowOutsideTransConfig,
    severity: Severity,
}

impl Default for ShowOutsideTrans {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowOutsideTrans {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ShowOutsideTransConfig::default(),
            severity: Severity::Warning,
        }
    }

    /// Creates a rule from its configuration section, falling back to defaults.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let defaults = ShowOutsideTransConfig::default();
        let mut rule = Self::new()
            .wait_threshold(config.get_float("wait_threshold", defaults.wait_threshold))
            .camera(config.get_str("camera", &defaults.camera));
        if let Some(layers) = config.get_str_array("exempt_layers") {
            rule = rule.exempt_layers(layers);
        }
        if let Some(calls) = config.get_str_array("trigger_calls") {
            rule = rule.trigger_calls(calls);
        }
        rule
    }

    /// Sets the wait threshold in seconds.
    #[must_use]
    pub fn wait_threshold(mut self, seconds: f64) -> Self {
        self.config.wait_threshold = seconds;
        self
    }

    /// Sets the exempt layers.
    #[must_use]
    pub fn exempt_layers(mut self, layers: Vec<String>) -> Self {
        self.config.exempt_layers = layers;
        self
    }

    /// Sets the calls that reset the wait counter.
    #[must_use]
    pub fn trigger_calls(mut self, calls: Vec<String>) -> Self {
        self.config.trigger_calls = calls;
        self
    }

    /// Sets the camera object name.
    #[must_use]
    pub fn camera(mut self, camera: impl Into<String>) -> Self {
        self.config.camera = camera.into();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_free_show(&self, event: &InvocationEvent) -> bool {
        if event.name != SHOW_CALL || !event.lexical_context.is_empty() {
            return false;
        }
        match event.arg(0) {
            None => false,
            Some(layer) => !layer
                .as_text()
                .is_some_and(|l| self.config.exempt_layers.iter().any(|e| e == l)),
        }
    }

    fn is_camera_trans(&self, event: &InvocationEvent) -> bool {
        event.name.contains(TRANS_MARKER)
            && event.arguments.len() >= 2
            && event.first_arg_text() == Some(self.config.camera.as_str())
            && !event.arguments[1].is_nil()
    }

    fn shows_outside_trans(&self, entry: &AnalyzedEntry<'_>) -> bool {
        let mut waited = 0.0;
        let mut show = false;
        let mut trans = false;

        for event in &entry.events {
            if self.config.trigger_calls.iter().any(|c| *c == event.name) {
                waited = 0.0;
            } else if event.name == WAIT_CALL {
                if let Some(seconds) = event.arg(0).and_then(|a| a.as_number()) {
                    waited += seconds;
                }
            }

            if self.is_free_show(event) {
                show = true;
            } else if waited < self.config.wait_threshold && self.is_camera_trans(event) {
                trans = true;
            }
        }

        show && trans
    }
}

impl Rule for ShowOutsideTrans {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags show() calls made outside of a camera transition"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
        ctx.entries
            .iter()
            .filter(|entry| self.shows_outside_trans(entry))
            .map(|entry| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(entry),
                    "show() outside of trans()",
                )
                .with_suggestion(Suggestion::new(
                    "Move the show() into the transition's function, or wait before transitioning",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chapter, check_script, messages};
    use scenario_lint_core::Config;

    fn check(rule: &ShowOutsideTrans, code: &str) -> Vec<Violation> {
        check_script(rule, &chapter(&format!("<|\n{code}\n|>\nText.")))
    }

    #[test]
    fn test_show_then_trans() {
        let violations = check(
            &ShowOutsideTrans::new(),
            "show(chara, 'smile')\ntrans(cam, 'fade', 1)",
        );
        assert_eq!(messages(&violations), vec!["show() outside of trans()"]);
    }

    #[test]
    fn test_show_inside_trans_closure() {
        let code = "anim:trans(cam, function()\n  show(chara, 'smile')\nend, 'fade', 1)";
        assert!(check(&ShowOutsideTrans::new(), code).is_empty());
    }

    #[test]
    fn test_exempt_layers() {
        let code = "show(bg, 'room')\nshow('fg', 'rain')\ntrans(cam, 'fade', 1)";
        assert!(check(&ShowOutsideTrans::new(), code).is_empty());
    }

    #[test]
    fn test_wait_separates_show_and_trans() {
        let code = "show(chara, 'smile')\nwait(0.5)\ntrans(cam, 'fade', 1)";
        assert!(check(&ShowOutsideTrans::new(), code).is_empty());

        let code = "show(chara, 'smile')\nwait(0.02)\nwait(0.03)\ntrans(cam, 'fade', 1)";
        assert_eq!(check(&ShowOutsideTrans::new(), code).len(), 1);
    }

    #[test]
    fn test_trigger_resets_wait() {
        let code = "show(chara, 'smile')\nwait(1)\nanim:move(chara, {0, 1}, 1)\ntrans(cam, 'fade', 1)";
        assert_eq!(check(&ShowOutsideTrans::new(), code).len(), 1);
    }

    #[test]
    fn test_trans_needs_camera_and_second_argument() {
        let rule = ShowOutsideTrans::new();
        assert!(check(&rule, "show(chara, 'a')\ntrans(chara, 'fade')").is_empty());
        assert!(check(&rule, "show(chara, 'a')\ntrans(cam, nil)").is_empty());
        assert!(check(&rule, "show(chara, 'a')\ntrans(cam)").is_empty());
        assert_eq!(check(&rule, "show(chara, 'a')\ntrans_left(cam, 'x')").len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = Config::parse(
            "[rules.show-outside-trans]\nwait_threshold = 2\nexempt_layers = [\"chara\"]",
        )
        .unwrap();
        let config = config.rule_config(NAME).unwrap();
        let rule = ShowOutsideTrans::from_config(config);
        assert!(check(&rule, "show(chara, 'a')\ntrans(cam, 'fade')").is_empty());
        assert_eq!(check(&rule, "show(bg, 'a')\nwait(1)\ntrans(cam, 'fade')").len(), 1);
    }
}
