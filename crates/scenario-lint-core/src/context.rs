//! Context types for rule execution.

use crate::script::{Chapter, Entry};
use crate::types::Location;
use crate::utils::Allowances;
use crate::walker::{walk_code, InvocationEvent, WalkerOptions};
use scenario_lint_lua::LuaError;
use std::path::{Path, PathBuf};

/// Script file being analyzed.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the analysis root, used in locations.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Location of a line in this file.
    #[must_use]
    pub fn location(&self, line: u32) -> Location {
        Location::new(self.relative_path.clone(), line as usize, 1)
    }
}

/// An entry together with the invocation stream of its code.
#[derive(Debug, Clone)]
pub struct AnalyzedEntry<'a> {
    /// The parsed entry.
    pub entry: &'a Entry,
    /// Calls made by the entry's code, in order. Empty if the code does not parse.
    pub events: Vec<InvocationEvent>,
    /// Syntax error in the entry's code, if any.
    pub code_error: Option<LuaError>,
    /// Allow directives found in the entry's code.
    pub allowances: Allowances,
}

impl<'a> AnalyzedEntry<'a> {
    /// Walks the entry's code once.
    #[must_use]
    pub fn new(entry: &'a Entry, options: &WalkerOptions) -> Self {
        let (events, code_error) = if entry.has_code() {
            match walk_code(&entry.code, options) {
                Ok(events) => (events, None),
                Err(e) => (Vec::new(), Some(e)),
            }
        } else {
            (Vec::new(), None)
        };

        Self {
            entry,
            events,
            code_error,
            allowances: Allowances::from_code(&entry.code),
        }
    }

    /// Line of the entry.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.entry.line_number
    }
}

/// Context provided to rules: one chapter with its pre-walked entries.
#[derive(Debug, Clone)]
pub struct ChapterContext<'a> {
    /// File the chapter comes from.
    pub file: &'a FileContext<'a>,
    /// The chapter itself.
    pub chapter: &'a Chapter,
    /// Entries in document order.
    pub entries: Vec<AnalyzedEntry<'a>>,
}

impl<'a> ChapterContext<'a> {
    /// Walks every entry of `chapter`.
    #[must_use]
    pub fn new(file: &'a FileContext<'a>, chapter: &'a Chapter, options: &WalkerOptions) -> Self {
        let entries = chapter
            .entries
            .iter()
            .map(|entry| AnalyzedEntry::new(entry, options))
            .collect();
        Self {
            file,
            chapter,
            entries,
        }
    }

    /// Location of an entry.
    #[must_use]
    pub fn location(&self, entry: &AnalyzedEntry<'_>) -> Location {
        self.file.location(entry.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    #[test]
    fn test_relative_location() {
        let ctx = FileContext::new(
            Path::new("/scripts/ch1.txt"),
            "",
            Path::new("/scripts"),
        );
        let location = ctx.location(7);
        assert_eq!(location.file, PathBuf::from("ch1.txt"));
        assert_eq!(location.line, 7);
        assert_eq!(location.column, 1);
    }

    #[test]
    fn test_entries_are_walked_once() {
        let text = "@<|label('c')|>\n<|show(bg, 'a')|>\nhi\n\n<|show(|>\nbroken\n@<||>";
        let chapters = parse_script(text).unwrap();
        let file = FileContext::new(Path::new("c.txt"), text, Path::new("."));
        let ctx = ChapterContext::new(&file, &chapters[0], &WalkerOptions::default());

        assert_eq!(ctx.entries.len(), 2);
        assert_eq!(ctx.entries[0].events.len(), 1);
        assert!(ctx.entries[0].code_error.is_none());
        assert!(ctx.entries[1].events.is_empty());
        assert!(ctx.entries[1].code_error.is_some());
    }
}
