//! Dialogue text helpers: name splitting and normalization.

use regex::Regex;
use std::sync::OnceLock;

/// ASCII name/dialogue separator.
pub const NAME_SEPARATOR: &str = "::";

/// Full-width name/dialogue separator.
pub const FULL_WIDTH_NAME_SEPARATOR: &str = "：：";

/// Separator between the display name and the hidden character name.
pub const HIDDEN_NAME_SEPARATOR: &str = "//";

/// Result of splitting a dialogue buffer at its name separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSplit<'a> {
    /// Name part before the separator (or before `//`).
    pub display_name: Option<&'a str>,
    /// Character name written after `//`.
    pub hidden_name: Option<&'a str>,
    /// Everything after the separator, or the whole buffer if there is none.
    pub dialogue: &'a str,
}

impl<'a> NameSplit<'a> {
    fn nameless(text: &'a str) -> Self {
        Self {
            display_name: None,
            hidden_name: None,
            dialogue: text,
        }
    }

    /// Returns true if a separator was found.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.display_name.is_some() || self.hidden_name.is_some()
    }
}

/// Splits `name::dialogue` (or the full-width form) at the first separator.
///
/// The dialogue part may span several lines. A name part containing a colon,
/// a single `/` or a newline is not a name, and the buffer stays nameless.
#[must_use]
pub fn split_name_dialogue<'a>(text: &'a str) -> NameSplit<'a> {
    let separator = [NAME_SEPARATOR, FULL_WIDTH_NAME_SEPARATOR]
        .iter()
        .filter_map(|sep| text.find(sep).map(|pos| (pos, sep.len())))
        .min_by_key(|(pos, _)| *pos);

    let Some((pos, sep_len)) = separator else {
        return NameSplit::nameless(text);
    };

    let prefix = &text[..pos];
    if prefix.contains([':', '：', '\n']) {
        return NameSplit::nameless(text);
    }

    let (display, hidden) = match prefix.split_once(HIDDEN_NAME_SEPARATOR) {
        Some((display, hidden)) => (display, Some(hidden)),
        None => (prefix, None),
    };
    if display.contains('/') || hidden.is_some_and(|h| h.contains('/')) {
        return NameSplit::nameless(text);
    }

    let non_empty = |s: &'a str| Some(s.trim()).filter(|s| !s.is_empty());
    NameSplit {
        display_name: non_empty(display),
        hidden_name: hidden.and_then(non_empty),
        dialogue: &text[pos + sep_len..],
    }
}

/// Options for [`normalize_dialogue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Remove `<tag=value>inner</tag>` markup, keeping the inner text.
    pub remove_rich_text: bool,
    /// Remove `（TODO：...）` notes.
    pub remove_todo: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_rich_text: true,
            remove_todo: true,
        }
    }
}

/// Strips markup and notes from dialogue so only reader-visible text remains.
#[must_use]
pub fn normalize_dialogue(text: &str, options: NormalizeOptions) -> String {
    let mut s = if options.remove_rich_text {
        strip_rich_text(text)
    } else {
        text.to_string()
    };

    if options.remove_todo {
        s = todo_note_pattern().replace_all(&s, "").into_owned();
    }

    space_run_pattern().replace_all(&s, " ").trim().to_string()
}

/// Removes rich text tags repeatedly until none remain, innermost content kept.
#[must_use]
pub fn strip_rich_text(text: &str) -> String {
    let mut s = text.to_string();
    while let Some(next) = strip_first_tag(&s) {
        s = next;
    }
    s
}

fn strip_first_tag(s: &str) -> Option<String> {
    for caps in open_tag_pattern().captures_iter(s) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let close = format!("</{}>", name.as_str());
        if let Some(rel) = s[whole.end()..].find(&close) {
            let inner_end = whole.end() + rel;
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..whole.start()]);
            out.push_str(&s[whole.end()..inner_end]);
            out.push_str(&s[inner_end + close.len()..]);
            return Some(out);
        }
    }
    None
}

#[allow(clippy::expect_used)]
fn open_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<([^=>/][^=>]*)(=[^>]*)?>").expect("valid tag pattern"))
}

#[allow(clippy::expect_used)]
fn todo_note_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\r?\n?（TODO：([^：]*：)?([^（）]*（[^）]*）)*[^）]*）")
            .expect("valid TODO pattern")
    })
}

#[allow(clippy::expect_used)]
fn space_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(" +").expect("valid space pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ascii_separator() {
        let split = split_name_dialogue("A::B");
        assert_eq!(split.display_name, Some("A"));
        assert_eq!(split.hidden_name, None);
        assert_eq!(split.dialogue, "B");
    }

    #[test]
    fn test_split_full_width_separator_multiline() {
        let split = split_name_dialogue("爱丽丝：：“第一行\n第二行::还是对白”");
        assert_eq!(split.display_name, Some("爱丽丝"));
        assert_eq!(split.dialogue, "“第一行\n第二行::还是对白”");
    }

    #[test]
    fn test_split_without_separator_is_nameless() {
        let split = split_name_dialogue("Just narration.");
        assert!(!split.has_name());
        assert_eq!(split.dialogue, "Just narration.");
    }

    #[test]
    fn test_split_hidden_name() {
        let split = split_name_dialogue("???//alice::“Hi.”");
        assert_eq!(split.display_name, Some("???"));
        assert_eq!(split.hidden_name, Some("alice"));
        assert_eq!(split.dialogue, "“Hi.”");
    }

    #[test]
    fn test_colon_in_prefix_is_not_a_name() {
        let split = split_name_dialogue("time: 10::00");
        assert!(!split.has_name());
        assert_eq!(split.dialogue, "time: 10::00");
    }

    #[test]
    fn test_strip_nested_rich_text() {
        assert_eq!(
            strip_rich_text("<color=#ff0000>red <b>bold</b></color> plain"),
            "red bold plain"
        );
        assert_eq!(strip_rich_text("a < b > c"), "a < b > c");
    }

    #[test]
    fn test_normalize_removes_todo_and_spaces() {
        let text = "“Hello  <size=1.5>there</size>.”（TODO：voice：check）";
        assert_eq!(
            normalize_dialogue(text, NormalizeOptions::default()),
            "“Hello there.”"
        );
        let kept = normalize_dialogue(
            text,
            NormalizeOptions {
                remove_rich_text: true,
                remove_todo: false,
            },
        );
        assert!(kept.ends_with("（TODO：voice：check）"));
    }
}
