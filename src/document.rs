//! Todo document - a file's text plus line access and line edits

use std::path::{Path, PathBuf};

use crate::error::{Result, TodoError};
use crate::line::{strip_line_ending, LineIndex};
use crate::syntax::{cycle, scan, Region, TokenSet};

/// A plain-text todo document
#[derive(Debug, Clone)]
pub struct TodoDocument {
    /// Full text, line endings as read
    text: String,
    /// Line index over `text`
    index: LineIndex,
    /// Associated file path (None for in-memory documents)
    filename: Option<PathBuf>,
    /// Whether the text changed since it was loaded or saved
    modified: bool,
}

impl TodoDocument {
    /// Create an in-memory document
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            index: LineIndex::new(&text),
            text,
            filename: None,
            modified: false,
        }
    }

    /// Create a document from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut doc = Self::new(content);
        doc.filename = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Check if document is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// Line text by index, without its line ending
    pub fn line(&self, idx: usize) -> Option<&str> {
        let span = self.index.line_span(idx)?;
        Some(strip_line_ending(&self.text[span]))
    }

    /// Iterate over all lines
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.line_count()).filter_map(move |idx| self.line(idx))
    }

    /// Scan the document into highlighted regions
    pub fn regions(&self, tokens: &TokenSet) -> Vec<Region> {
        scan(&self.text, tokens)
    }

    /// Replace a line's content, keeping its line ending
    pub fn replace_line(&mut self, idx: usize, new_text: &str) -> Result<()> {
        let range = self
            .index
            .line_range(&self.text, idx)
            .ok_or(TodoError::LineOutOfRange {
                line: idx + 1,
                count: self.line_count(),
            })?;
        self.text.replace_range(range, new_text);
        self.index = LineIndex::new(&self.text);
        self.modified = true;
        Ok(())
    }

    /// Cycle the state of every listed line
    ///
    /// All replacements are computed before any is applied; lines listed
    /// more than once are cycled once. Returns the number of lines changed.
    pub fn cycle_lines(&mut self, lines: &[usize], tokens: &TokenSet) -> Result<usize> {
        let mut targets = lines.to_vec();
        targets.sort_unstable();
        targets.dedup();

        let mut edits = Vec::with_capacity(targets.len());
        for &idx in &targets {
            let line = self.line(idx).ok_or(TodoError::LineOutOfRange {
                line: idx + 1,
                count: self.line_count(),
            })?;
            edits.push((idx, cycle(line, tokens)));
        }

        // Back to front so earlier offsets stay valid
        for (idx, new_text) in edits.iter().rev() {
            self.replace_line(*idx, new_text)?;
        }
        Ok(edits.len())
    }

    /// Write document to its file
    pub fn save(&mut self) -> Result<()> {
        let path = self.filename.clone().ok_or_else(|| {
            TodoError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No filename set",
            ))
        })?;
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    /// Write document to a specific path
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.text)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn tokens() -> TokenSet {
        TokenSet::standard().unwrap()
    }

    #[test]
    fn test_lines() {
        let doc = TodoDocument::new("- a\r\n+ b\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), Some("- a"));
        assert_eq!(doc.line(1), Some("+ b"));
        assert_eq!(doc.line(2), Some(""));
        assert_eq!(doc.line(3), None);
        assert_eq!(doc.lines().collect::<Vec<_>>(), vec!["- a", "+ b", ""]);
    }

    #[test]
    fn test_replace_line_keeps_endings() {
        let mut doc = TodoDocument::new("- a\r\n+ b\nc");
        doc.replace_line(0, "+ a").unwrap();
        doc.replace_line(2, "- c").unwrap();
        assert_eq!(doc.text(), "+ a\r\n+ b\n- c");
        assert!(doc.is_modified());
    }

    #[test]
    fn test_replace_line_out_of_range() {
        let mut doc = TodoDocument::new("- a");
        assert!(matches!(
            doc.replace_line(5, "x"),
            Err(TodoError::LineOutOfRange { line: 6, count: 1 })
        ));
    }

    #[test]
    fn test_cycle_lines() {
        let mut doc = TodoDocument::new("- a\n  + b\nplain\n-> d");
        let changed = doc.cycle_lines(&[3, 0, 1, 2, 1], &tokens()).unwrap();
        assert_eq!(changed, 4);
        assert_eq!(doc.text(), "+ a\n  -> b\n- plain\n-- d");
    }

    #[test]
    fn test_cycle_lines_rejects_bad_index_without_editing() {
        let mut doc = TodoDocument::new("- a\n+ b");
        assert!(matches!(
            doc.cycle_lines(&[0, 9], &tokens()),
            Err(TodoError::LineOutOfRange { line: 10, count: 2 })
        ));
        assert_eq!(doc.text(), "- a\n+ b");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_regions() {
        let doc = TodoDocument::new("- a\n-- note\n+ b");
        assert_eq!(doc.regions(&tokens()).len(), 2);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.todo");
        std::fs::write(&path, "- a\n+ b\n").unwrap();

        let mut doc = TodoDocument::from_file(&path).unwrap();
        assert_eq!(doc.filename(), Some(path.as_path()));
        doc.cycle_lines(&[0], &tokens()).unwrap();
        doc.save().unwrap();
        assert!(!doc.is_modified());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "+ a\n+ b\n");
    }

    #[test]
    fn test_save_without_filename() {
        let mut doc = TodoDocument::new("- a");
        assert!(matches!(doc.save(), Err(TodoError::Io(_))));
    }
}
