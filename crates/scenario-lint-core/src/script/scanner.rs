//! Line scanner.

/// A trimmed source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line number (1-indexed).
    pub number: u32,
    /// Byte offset of the first non-blank character in the source.
    pub offset: usize,
    /// Line content without surrounding whitespace.
    pub text: &'a str,
}

/// Splits text into trimmed lines, tolerating `\r\n` and a leading BOM.
pub fn scan_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let start = offset;
            offset += raw.len();

            let is_blank = |c: char| c.is_whitespace() || c == '\u{feff}';
            let leading = raw.len() - raw.trim_start_matches(is_blank).len();
            Line {
                number: u32::try_from(index + 1).unwrap_or(u32::MAX),
                offset: start + leading,
                text: raw.trim_matches(is_blank),
            }
        })
}
