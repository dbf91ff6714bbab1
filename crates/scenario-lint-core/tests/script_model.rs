//! Integration tests for script parsing, formatting and walking.

use scenario_lint_core::script::{format_chapters, parse_script, Chapter};
use scenario_lint_core::walker::walk_code;
use scenario_lint_core::{ChapterContext, FileContext, WalkerOptions};
use std::path::Path;

const MINIMAL: &str = include_str!("fixtures/minimal.txt");
const PROLOGUE: &str = include_str!("fixtures/prologue.txt");

fn assert_same_chapters(a: &[Chapter], b: &[Chapter]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!(x.same_content(y), "{x:#?}\n!=\n{y:#?}");
    }
}

#[test]
fn minimal_script_parses_to_one_entry() {
    let chapters = parse_script(MINIMAL).unwrap();
    assert_eq!(chapters.len(), 1);

    let chapter = &chapters[0];
    assert_eq!(chapter.name, "ch1");
    assert_eq!(chapter.tail_directive_code, "");
    assert_eq!(chapter.entries.len(), 1);

    let entry = &chapter.entries[0];
    assert_eq!(entry.code, "show('bg', 'room')");
    assert_eq!(entry.character_name.as_deref(), Some("Alice"));
    assert_eq!(entry.dialogue.as_deref(), Some("“Hello.”"));
}

#[test]
fn prologue_chapters_and_entries() {
    let chapters = parse_script(PROLOGUE).unwrap();
    let names: Vec<_> = chapters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["prologue", "ch1"]);

    let prologue = &chapters[0];
    assert_eq!(
        prologue.head_directive_code,
        "label('prologue', 'Prologue')\nis_default_start()"
    );
    assert_eq!(prologue.tail_directive_code, "jump_to('ch1')");

    let lines: Vec<_> = prologue.entries.iter().map(|e| e.line_number).collect();
    assert_eq!(lines, vec![5, 11, 17, 19, 21]);

    let speakers: Vec<_> = prologue
        .entries
        .iter()
        .map(|e| e.character_name.as_deref())
        .collect();
    assert_eq!(
        speakers,
        vec![None, Some("Alice"), Some("bob"), Some("bob"), None]
    );
    assert_eq!(prologue.entries[3].display_name.as_deref(), Some("???"));
    assert_eq!(prologue.entries[4].dialogue.as_deref(), Some("She didn't answer."));
}

#[test]
fn formatted_scripts_parse_back_to_the_same_chapters() {
    for source in [MINIMAL, PROLOGUE] {
        let chapters = parse_script(source).unwrap();
        let formatted = format_chapters(&chapters);
        let reparsed = parse_script(&formatted).unwrap();
        assert_same_chapters(&chapters, &reparsed);

        // Formatting is stable once normalized
        assert_eq!(format_chapters(&reparsed), formatted);
    }
}

#[test]
fn chapter_context_walks_chained_calls() {
    let chapters = parse_script(PROLOGUE).unwrap();
    let file = FileContext::new(Path::new("prologue.txt"), PROLOGUE, Path::new("."));
    let ctx = ChapterContext::new(&file, &chapters[0], &WalkerOptions::default());

    let names: Vec<_> = ctx.entries[1]
        .events
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["anim_hold_begin", "anim", "move", "fade_in_text"]);
    assert!(ctx.entries[1].events.iter().all(|e| e.lexical_context.is_empty()));
}

#[test]
fn sibling_statements_see_the_block_context() {
    let code = "anim:action(function()\n  hold()\nend)\nshow(fg, 'x')";
    let events = walk_code(code, &WalkerOptions::default()).unwrap();

    let hold = events.iter().find(|e| e.name == "hold").unwrap();
    assert!(hold.lexical_context.contains("anim"));

    let show = events.iter().find(|e| e.name == "show").unwrap();
    assert!(show.lexical_context.is_empty());
}
