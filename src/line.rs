//! Line index and line text helpers

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

/// Offset-to-line lookup over a document's text
///
/// Lines are separated by `\n`; a trailing `\n` starts one more (empty)
/// line, the way editors count lines. A `\r` before the `\n` belongs to
/// the line's ending, not its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line
    starts: Vec<usize>,
    /// Total length of the text in bytes
    len: usize,
}

impl LineIndex {
    /// Index the lines of `text`
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines (at least one, even for empty text)
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Line containing a byte offset; offsets past the end map to the
    /// last line
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    /// Byte range of a line's full extent, line ending included
    pub fn line_span(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.starts.get(line)?;
        let end = self.starts.get(line + 1).copied().unwrap_or(self.len);
        Some(start..end)
    }

    /// Byte range of a line's content, line ending excluded
    pub fn line_range(&self, text: &str, line: usize) -> Option<Range<usize>> {
        let span = self.line_span(line)?;
        let content = strip_line_ending(&text[span.clone()]);
        Some(span.start..span.start + content.len())
    }
}

/// Remove a trailing `\n` or `\r\n`
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Display width of a line in terminal columns
pub fn display_width(text: &str) -> usize {
    text.width()
}
