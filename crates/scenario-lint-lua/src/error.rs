//! Errors for embedded code.

/// Why a code block could not be turned into a [`Block`](crate::Block).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LuaError {
    /// The grammar rejected the code.
    #[error("{0}")]
    Syntax(String),

    /// A numeric literal the grammar accepted but whose value could not be read.
    #[error("malformed number '{text}' at line {line}")]
    MalformedNumber {
        /// Literal as written.
        text: String,
        /// Line within the code block (1-based).
        line: usize,
    },

    /// A node produced by a grammar extension this crate does not model.
    #[error("unsupported syntax '{code}' at line {line}")]
    Unsupported {
        /// Source text of the node.
        code: String,
        /// Line within the code block (1-based).
        line: usize,
    },
}

impl LuaError {
    pub(crate) fn from_grammar(errors: &[full_moon::Error]) -> Self {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Self::Syntax(messages.join("; "))
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, LuaError>;
