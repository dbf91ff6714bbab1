//! Chapter state machine.
//!
//! Lines are consumed one at a time in three states:
//!
//! - `Text`: dialogue lines accumulate, a blank line commits an entry.
//! - `InEagerDirective`: `@<| ... |>` lines accumulate, closing commits a
//!   chapter head or tail.
//! - `InLazyCode`: `<| ... |>` lines accumulate as the code of the next entry.

use super::dialogue::split_name_dialogue;
use super::error::{BlockKind, ScriptError};
use super::model::{Chapter, Entry};
use super::scanner::{scan_lines, Line};
use miette::SourceSpan;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const EAGER_OPENER: &str = "@<|";
const LAZY_OPENER: &str = "<|";
const CLOSER: &str = "|>";

/// Parses a whole script into chapters.
///
/// # Errors
///
/// Returns a [`ScriptError`] if the script is structurally malformed. No
/// partial chapter list is returned in that case.
pub fn parse_script(text: &str) -> Result<Vec<Chapter>, ScriptError> {
    let mut parser = ScriptParser::new();
    for line in scan_lines(text) {
        parser.feed(line)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    InEagerDirective,
    InLazyCode,
}

/// Position of a block opener, kept for diagnostics.
#[derive(Debug, Clone, Copy)]
struct Marker {
    line: u32,
    span: SourceSpan,
}

impl Marker {
    fn at(line: &Line<'_>, len: usize) -> Self {
        Self {
            line: line.number,
            span: SourceSpan::from((line.offset, len)),
        }
    }
}

#[derive(Debug)]
struct OpenChapter {
    name: String,
    head: String,
    entries: Vec<Entry>,
    opened: Marker,
    /// Display names mapped to the character they stand for.
    hidden_names: HashMap<String, String>,
}

/// Incremental chapter parser fed with scanned lines.
#[derive(Debug)]
pub struct ScriptParser<'a> {
    state: State,
    chapters: Vec<Chapter>,
    open: Option<OpenChapter>,
    block_start: Option<Marker>,
    directive_lines: Vec<&'a str>,
    code_lines: Vec<&'a str>,
    dialogue_lines: Vec<&'a str>,
    /// First line contributing to the pending entry.
    pending_line: Option<u32>,
}

impl Default for ScriptParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScriptParser<'a> {
    /// Creates a parser in the `Text` state with no open chapter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Text,
            chapters: Vec::new(),
            open: None,
            block_start: None,
            directive_lines: Vec::new(),
            code_lines: Vec::new(),
            dialogue_lines: Vec::new(),
            pending_line: None,
        }
    }

    /// Consumes one trimmed line.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::MissingChapterLabel`] when a head directive
    /// closes without a label.
    pub fn feed(&mut self, line: Line<'a>) -> Result<(), ScriptError> {
        match self.state {
            State::Text => self.text_line(line),
            State::InEagerDirective => self.block_line(line, BlockKind::EagerDirective),
            State::InLazyCode => self.block_line(line, BlockKind::LazyCode),
        }
    }

    /// Ends the input and returns the completed chapters.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnterminatedBlock`] if a block is still open and
    /// [`ScriptError::UnclosedChapter`] if a chapter has no tail.
    pub fn finish(self) -> Result<Vec<Chapter>, ScriptError> {
        if let Some(kind) = self.open_block_kind() {
            let start = self.block_start.unwrap_or(Marker {
                line: 0,
                span: SourceSpan::from((0, 0)),
            });
            return Err(ScriptError::UnterminatedBlock {
                kind,
                line: start.line,
                span: start.span,
            });
        }

        if let Some(open) = self.open {
            return Err(ScriptError::UnclosedChapter {
                name: open.name,
                line: open.opened.line,
                span: open.opened.span,
            });
        }

        if self.has_pending() {
            tracing::warn!(
                line = self.pending_line,
                "discarding trailing text outside of any chapter"
            );
        }

        tracing::debug!(chapters = self.chapters.len(), "script parsed");
        Ok(self.chapters)
    }

    fn open_block_kind(&self) -> Option<BlockKind> {
        match self.state {
            State::Text => None,
            State::InEagerDirective => Some(BlockKind::EagerDirective),
            State::InLazyCode => Some(BlockKind::LazyCode),
        }
    }

    fn text_line(&mut self, line: Line<'a>) -> Result<(), ScriptError> {
        let text = line.text;
        if let Some(rest) = text.strip_prefix(EAGER_OPENER) {
            self.open_block(line, rest, BlockKind::EagerDirective)
        } else if let Some(rest) = text.strip_prefix(LAZY_OPENER) {
            self.open_block(line, rest, BlockKind::LazyCode)
        } else if text.is_empty() {
            self.commit_dialogue();
            Ok(())
        } else {
            self.pending_line.get_or_insert(line.number);
            self.dialogue_lines.push(text);
            Ok(())
        }
    }

    fn open_block(
        &mut self,
        line: Line<'a>,
        rest: &'a str,
        kind: BlockKind,
    ) -> Result<(), ScriptError> {
        let marker = Marker::at(&line, kind.opener().len());
        self.block_start = Some(marker);

        if kind == BlockKind::LazyCode {
            self.pending_line.get_or_insert(line.number);
        }

        if let Some(inner) = rest.strip_suffix(CLOSER) {
            self.push_block_line(kind, inner.trim());
            return self.close_block(kind);
        }

        self.push_block_line(kind, rest.trim());
        self.state = match kind {
            BlockKind::EagerDirective => State::InEagerDirective,
            BlockKind::LazyCode => State::InLazyCode,
        };
        Ok(())
    }

    fn block_line(&mut self, line: Line<'a>, kind: BlockKind) -> Result<(), ScriptError> {
        match line.text.strip_suffix(CLOSER) {
            Some(inner) => {
                self.push_block_line(kind, inner.trim());
                self.close_block(kind)
            }
            None => {
                let buffer = match kind {
                    BlockKind::EagerDirective => &mut self.directive_lines,
                    BlockKind::LazyCode => &mut self.code_lines,
                };
                buffer.push(line.text);
                Ok(())
            }
        }
    }

    /// Pushes an opener or closer remainder, which only counts when non-empty.
    fn push_block_line(&mut self, kind: BlockKind, text: &'a str) {
        if text.is_empty() {
            return;
        }
        match kind {
            BlockKind::EagerDirective => self.directive_lines.push(text),
            BlockKind::LazyCode => self.code_lines.push(text),
        }
    }

    fn close_block(&mut self, kind: BlockKind) -> Result<(), ScriptError> {
        self.state = State::Text;
        match kind {
            BlockKind::EagerDirective => self.commit_eager(),
            BlockKind::LazyCode => Ok(()),
        }
    }

    fn has_pending(&self) -> bool {
        self.code_lines.iter().any(|l| !l.is_empty()) || !self.dialogue_lines.is_empty()
    }

    fn clear_pending(&mut self) {
        self.code_lines.clear();
        self.dialogue_lines.clear();
        self.pending_line = None;
    }

    fn commit_dialogue(&mut self) {
        if !self.has_pending() {
            self.clear_pending();
            return;
        }

        let line = self.pending_line.unwrap_or_default();
        match self.open.as_mut() {
            Some(open) => {
                let entry = build_entry(
                    &self.code_lines,
                    &self.dialogue_lines,
                    line,
                    &mut open.hidden_names,
                );
                open.entries.push(entry);
            }
            None => {
                tracing::warn!(line, "discarding text outside of any chapter");
            }
        }
        self.clear_pending();
    }

    fn commit_eager(&mut self) -> Result<(), ScriptError> {
        let text = self.directive_lines.join("\n");
        self.directive_lines.clear();
        let Some(marker) = self.block_start.take() else {
            return Ok(());
        };

        if self.open.is_some() {
            self.commit_dialogue();
            if let Some(open) = self.open.take() {
                if find_label(&text).is_some() {
                    tracing::warn!(
                        line = marker.line,
                        chapter = %open.name,
                        "tail directive contains a label; a tail may be missing before it"
                    );
                }
                tracing::debug!(
                    chapter = %open.name,
                    entries = open.entries.len(),
                    "chapter closed"
                );
                self.chapters.push(Chapter {
                    name: open.name,
                    entries: open.entries,
                    head_directive_code: open.head,
                    tail_directive_code: text,
                    line_number: open.opened.line,
                });
            }
            return Ok(());
        }

        if self.has_pending() {
            tracing::warn!(
                line = self.pending_line,
                "discarding text before chapter head"
            );
        }
        self.clear_pending();

        let name = find_label(&text).ok_or(ScriptError::MissingChapterLabel {
            line: marker.line,
            span: marker.span,
        })?;
        tracing::debug!(chapter = %name, line = marker.line, "chapter opened");
        self.open = Some(OpenChapter {
            name: name.to_string(),
            head: text,
            entries: Vec::new(),
            opened: marker,
            hidden_names: HashMap::new(),
        });
        Ok(())
    }
}

fn build_entry(
    code_lines: &[&str],
    dialogue_lines: &[&str],
    line_number: u32,
    hidden_names: &mut HashMap<String, String>,
) -> Entry {
    let code = if code_lines.iter().any(|l| !l.is_empty()) {
        code_lines.join("\n")
    } else {
        String::new()
    };

    let buffer = dialogue_lines.join("\n");
    let split = split_name_dialogue(&buffer);

    let display_name = split.display_name.map(str::to_string);
    let character_name = match (split.hidden_name, split.display_name) {
        (Some(hidden), display) => {
            if let Some(display) = display {
                hidden_names.insert(display.to_string(), hidden.to_string());
            }
            Some(hidden.to_string())
        }
        (None, Some(display)) => Some(
            hidden_names
                .get(display)
                .cloned()
                .unwrap_or_else(|| display.to_string()),
        ),
        (None, None) => None,
    };

    let dialogue = split.dialogue.trim();
    Entry {
        code,
        character_name,
        display_name,
        dialogue: (!dialogue.is_empty()).then(|| dialogue.to_string()),
        line_number,
    }
}

/// Extracts the chapter name from a `label('...')` call.
fn find_label(code: &str) -> Option<&str> {
    let caps = label_pattern().captures(code)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
}

#[allow(clippy::expect_used)]
fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\blabel\s*\(?\s*(?:'([^']*)'|"([^"]*)")"#).expect("valid label pattern")
    })
}
