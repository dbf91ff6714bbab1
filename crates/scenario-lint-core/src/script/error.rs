//! Structural script errors.

use miette::{Diagnostic, SourceSpan};
use std::fmt;

/// Kind of delimited block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `@<| ... |>` block evaluated when the script structure loads.
    EagerDirective,
    /// `<| ... |>` block attached to the next entry.
    LazyCode,
}

impl BlockKind {
    /// Opening delimiter of this block kind.
    #[must_use]
    pub const fn opener(self) -> &'static str {
        match self {
            Self::EagerDirective => "@<|",
            Self::LazyCode => "<|",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EagerDirective => write!(f, "eager directive"),
            Self::LazyCode => write!(f, "lazy code"),
        }
    }
}

/// Error that makes a whole script untrustworthy.
///
/// Spans point into the script text; attach it with
/// [`miette::Report::with_source_code`] for rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ScriptError {
    /// A head directive has no `label('...')` call.
    #[error("chapter head directive at line {line} has no label")]
    #[diagnostic(
        code(scenario_lint::missing_chapter_label),
        help("add `label('chapter_name')` to the head directive")
    )]
    MissingChapterLabel {
        /// Line where the head directive opened.
        line: u32,
        /// Span of the opening delimiter.
        #[label("head directive opened here")]
        span: SourceSpan,
    },

    /// Input ended inside a block.
    #[error("{kind} block opened at line {line} is never closed")]
    #[diagnostic(
        code(scenario_lint::unterminated_block),
        help("close the block with `|>` at the end of a line")
    )]
    UnterminatedBlock {
        /// Kind of the open block.
        kind: BlockKind,
        /// Line where the block opened.
        line: u32,
        /// Span of the opening delimiter.
        #[label("opened here")]
        span: SourceSpan,
    },

    /// Input ended while a chapter was still open.
    #[error("chapter '{name}' opened at line {line} has no tail directive")]
    #[diagnostic(
        code(scenario_lint::unclosed_chapter),
        help("end the chapter with a tail directive such as `@<||>`")
    )]
    UnclosedChapter {
        /// Name of the open chapter.
        name: String,
        /// Line where the chapter's head directive opened.
        line: u32,
        /// Span of the head directive opener.
        #[label("chapter starts here")]
        span: SourceSpan,
    },
}

impl ScriptError {
    /// Line the error refers to.
    #[must_use]
    pub fn line(&self) -> u32 {
        match self {
            Self::MissingChapterLabel { line, .. }
            | Self::UnterminatedBlock { line, .. }
            | Self::UnclosedChapter { line, .. } => *line,
        }
    }
}
