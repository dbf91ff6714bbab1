//! Scenario script structure: chapters, entries and their delimiters.

pub mod dialogue;
mod error;
mod format;
mod model;
mod parser;
mod scanner;

pub use dialogue::{normalize_dialogue, split_name_dialogue, strip_rich_text, NormalizeOptions};
pub use error::{BlockKind, ScriptError};
pub use format::format_chapters;
pub use model::{Chapter, Entry};
pub use parser::{parse_script, ScriptParser};
pub use scanner::{scan_lines, Line};
