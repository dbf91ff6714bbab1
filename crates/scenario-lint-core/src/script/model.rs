//! Parsed script model.

use serde::{Deserialize, Serialize};

/// A named unit of script content delimited by a head and a tail directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Name taken from the `label('...')` call in the head directive.
    pub name: String,
    /// Dialogue entries in document order.
    pub entries: Vec<Entry>,
    /// Code of the head directive block.
    pub head_directive_code: String,
    /// Code of the tail directive block (may be empty).
    pub tail_directive_code: String,
    /// Line where the head directive block opened.
    pub line_number: u32,
}

impl Chapter {
    /// Compares two chapters ignoring line numbers.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.name == other.name
            && self.head_directive_code == other.head_directive_code
            && self.tail_directive_code == other.tail_directive_code
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.same_content(b))
    }
}

/// One beat of dialogue with its associated lazy code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Lazy code for this entry, blocks joined by newlines. Empty when absent.
    pub code: String,
    /// Character the line is attributed to.
    pub character_name: Option<String>,
    /// Name shown to the reader when written as `Display//character::`.
    pub display_name: Option<String>,
    /// Dialogue text with the name prefix removed.
    pub dialogue: Option<String>,
    /// First line that contributed to this entry.
    pub line_number: u32,
}

impl Entry {
    /// Returns true if the entry carries any code.
    #[must_use]
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    /// Returns the dialogue text or an empty string.
    #[must_use]
    pub fn dialogue_text(&self) -> &str {
        self.dialogue.as_deref().unwrap_or_default()
    }

    /// Compares two entries ignoring line numbers.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.code == other.code
            && self.character_name == other.character_name
            && self.display_name == other.display_name
            && self.dialogue == other.dialogue
    }
}
