//! Display rendering
//!
//! Draws a document with each region's lines on a whole-line background
//! and a marker in the ruler column to their left.

use std::io::Write;

use crate::document::TodoDocument;
use crate::error::Result;
use crate::line::display_width;
use crate::syntax::{Region, Rgba, StateStyle};
use crate::terminal::Terminal;

/// Ruler marker for highlighted lines
const RULER_MARK: &str = "▌";

/// Base color translucent backgrounds are composited over
const BASE: Rgba = Rgba::rgb(0, 0, 0);

/// Display settings
#[derive(Debug, Clone)]
pub struct Display {
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            tab_width: 8,
        }
    }
}

impl Display {
    /// Calculate width needed for line numbers (including separator)
    fn line_number_width(&self, line_count: usize) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = line_count.max(1).to_string().len();
        digits.max(3) + 1
    }

    /// Expand tabs to spaces
    fn expand_tabs(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch == '\t' {
                let width = display_width(&out);
                let pad = self.tab_width - width % self.tab_width;
                out.extend(std::iter::repeat(' ').take(pad));
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Render a whole document
    ///
    /// `regions` must be in document order, as `scan` returns them;
    /// `styles` is indexed by region state.
    pub fn render<W: Write>(
        &self,
        term: &mut Terminal<W>,
        doc: &TodoDocument,
        regions: &[Region],
        styles: &[StateStyle],
    ) -> Result<()> {
        let number_width = self.line_number_width(doc.line_count());
        let mut pending = regions.iter().peekable();

        for (idx, line) in doc.lines().enumerate() {
            while pending.peek().is_some_and(|r| r.end_line < idx) {
                pending.next();
            }
            let style = pending
                .peek()
                .filter(|r| r.contains_line(idx))
                .and_then(|r| styles.get(r.state));

            if number_width > 0 {
                term.write_str(&format!("{:>width$} ", idx + 1, width = number_width - 1))?;
            }

            let text = self.expand_tabs(line);
            match style {
                Some(style) => {
                    term.set_foreground(style.ruler.over(BASE))?;
                    term.write_str(RULER_MARK)?;
                    term.set_background(style.background.over(BASE))?;
                    term.set_dim(style.is_dim())?;
                    term.write_str(&text)?;

                    let used = number_width + 1 + display_width(&text);
                    let cols = usize::from(term.cols());
                    if used < cols {
                        term.write_str(&" ".repeat(cols - used))?;
                    }
                    term.reset_attributes()?;
                }
                None => {
                    term.write_str(" ")?;
                    term.write_str(&text)?;
                }
            }
            term.newline()?;
        }

        term.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn render(display: &Display, text: &str, cols: u16) -> String {
        let config = Config::default();
        let tokens = config.token_set().unwrap();
        let doc = TodoDocument::new(text);
        let regions = doc.regions(&tokens);

        let mut term = Terminal::new(Vec::new(), cols);
        display.render(&mut term, &doc, &regions, &config.styles()).unwrap();
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_lines_unstyled() {
        let out = render(&Display::default(), "hello\n-- note", 20);
        assert_eq!(out, " hello\n -- note\n");
    }

    #[test]
    fn test_highlighted_line_background() {
        let out = render(&Display::default(), "- a", 10);
        // rgb(230, 130, 130, 0.3) over black
        assert!(out.contains("48;2;69;39;39"));
        assert!(out.contains(RULER_MARK));
        // ruler + text + padding fill the 10 columns
        assert!(out.contains("- a      \x1b["));
    }

    #[test]
    fn test_done_drawn_dim() {
        let dim = render(&Display::default(), "+ done", 10);
        let normal = render(&Display::default(), "- open", 10);
        let dim_code = "\x1b[2m";
        assert!(dim.contains(dim_code));
        assert!(!normal.contains(dim_code));
    }

    #[test]
    fn test_line_numbers() {
        let display = Display {
            show_line_numbers: true,
            ..Display::default()
        };
        let out = render(&display, "x\ny", 20);
        assert_eq!(out, "  1  x\n  2  y\n");
    }

    #[test]
    fn test_expand_tabs() {
        let display = Display {
            tab_width: 4,
            ..Display::default()
        };
        assert_eq!(display.expand_tabs("\t- a"), "    - a");
        assert_eq!(display.expand_tabs("ab\tc"), "ab  c");
    }
}
