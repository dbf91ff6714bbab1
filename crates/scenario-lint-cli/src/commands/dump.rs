//! Dump command: re-serializes a script, or prints its dialogue only.

use anyhow::Result;
use scenario_lint_core::script::{format_chapters, normalize_dialogue, Chapter, NormalizeOptions};
use std::fmt::Write;
use std::path::Path;

/// Runs the dump command.
pub fn run(file: &Path, no_code: bool) -> Result<()> {
    let chapters = super::read_chapters(file)?;
    tracing::debug!("Dumping {} chapters", chapters.len());

    if no_code {
        print!("{}", dialogue_only(&chapters));
    } else {
        print!("{}", format_chapters(&chapters));
    }
    Ok(())
}

/// Chapter names followed by the reader-visible text of each entry.
fn dialogue_only(chapters: &[Chapter]) -> String {
    let options = NormalizeOptions {
        remove_todo: false,
        ..NormalizeOptions::default()
    };

    let mut out = String::new();
    for chapter in chapters {
        let _ = write!(out, "{}\n\n", chapter.name);
        for entry in &chapter.entries {
            let text = normalize_dialogue(entry.dialogue_text(), options);
            if text.is_empty() {
                continue;
            }
            match &entry.display_name {
                Some(name) => {
                    let _ = write!(out, "{name}：{text}\n\n");
                }
                None => {
                    let _ = write!(out, "{text}\n\n");
                }
            }
        }
    }
    out
}
