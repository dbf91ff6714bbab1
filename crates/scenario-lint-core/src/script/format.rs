//! Writes chapters back in block-delimiter syntax.

use super::dialogue::{split_name_dialogue, HIDDEN_NAME_SEPARATOR, NAME_SEPARATOR};
use super::model::{Chapter, Entry};
use std::fmt::Write;

/// Serializes chapters so that parsing the output yields the same content.
#[must_use]
pub fn format_chapters(chapters: &[Chapter]) -> String {
    let mut out = String::new();
    for (i, chapter) in chapters.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_chapter(&mut out, chapter);
    }
    out
}

fn write_chapter(out: &mut String, chapter: &Chapter) {
    write_block(out, "@<|", &chapter.head_directive_code);
    for entry in &chapter.entries {
        write_entry(out, entry);
        out.push('\n');
    }
    if chapter.tail_directive_code.is_empty() {
        out.push_str("@<||>\n");
    } else {
        write_block(out, "@<|", &chapter.tail_directive_code);
    }
}

fn write_block(out: &mut String, opener: &str, code: &str) {
    let _ = write!(out, "{opener}\n{code}\n|>\n");
}

fn write_entry(out: &mut String, entry: &Entry) {
    if entry.has_code() {
        write_block(out, "<|", &entry.code);
    }

    let dialogue = entry.dialogue_text();
    match (&entry.display_name, &entry.character_name) {
        (Some(display), Some(character)) if display == character => {
            let _ = write!(out, "{display}{NAME_SEPARATOR}");
        }
        (display, Some(character)) => {
            let display = display.as_deref().unwrap_or_default();
            let _ = write!(
                out,
                "{display}{HIDDEN_NAME_SEPARATOR}{character}{NAME_SEPARATOR}"
            );
        }
        (_, None) => {
            // Nameless text that would split on re-parse gets an empty name.
            if split_name_dialogue(dialogue).dialogue.len() < dialogue.len() {
                out.push_str(NAME_SEPARATOR);
            }
        }
    }

    if !dialogue.is_empty() || entry.character_name.is_some() {
        out.push_str(dialogue);
        out.push('\n');
    }
}
