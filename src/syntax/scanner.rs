//! Region builder
//!
//! Splits a document into regions: each region starts at a line whose
//! first token (after indentation) is a state token or the comment
//! marker, and runs until just before the next such line or to the end
//! of the document. Regions opened by the comment marker are dropped, so
//! comment lines split their neighbours without being highlighted.

use super::rules::TokenMatch;
use super::tokens::TokenSet;
use crate::line::LineIndex;

/// A highlighted line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Index of the state in the token set
    pub state: usize,
    /// First line (zero-based)
    pub start_line: usize,
    /// Last line, inclusive
    pub end_line: usize,
}

impl Region {
    /// Check if a line falls inside this region
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// A region in byte offsets, before line conversion
///
/// `end` is the offset of the newline that terminates the region's last
/// line, or the document length for the final region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSpan {
    pub state: usize,
    pub start: usize,
    pub end: usize,
}

/// State owning a matched literal, by suffix comparison against the
/// tokens in configured order. `None` for comment literals.
pub fn find_decoration(literal: &str, tokens: &TokenSet) -> Option<usize> {
    tokens.state_ending(literal)
}

fn close_region(spans: &mut Vec<RegionSpan>, start: &TokenMatch<'_>, end: usize, tokens: &TokenSet) {
    if let Some(state) = find_decoration(start.literal, tokens) {
        spans.push(RegionSpan {
            state,
            start: start.offset,
            end,
        });
    }
}

/// Scan `text` into regions in byte offsets
pub fn scan_spans(text: &str, tokens: &TokenSet) -> Vec<RegionSpan> {
    let mut spans = Vec::new();
    let mut pending: Option<TokenMatch<'_>> = None;

    for found in tokens.pattern().find_iter(text) {
        if let Some(start) = pending.take() {
            // Matches begin at a line start after an earlier match, so the
            // byte before is that line's newline.
            close_region(&mut spans, &start, found.offset - 1, tokens);
        }
        pending = Some(found);
    }

    if let Some(start) = pending {
        close_region(&mut spans, &start, text.len(), tokens);
    }

    spans
}

/// Scan `text` into line regions
pub fn scan(text: &str, tokens: &TokenSet) -> Vec<Region> {
    let index = LineIndex::new(text);
    let regions: Vec<Region> = scan_spans(text, tokens)
        .into_iter()
        .map(|span| Region {
            state: span.state,
            start_line: index.line_of(span.start),
            end_line: index.line_of(span.end),
        })
        .collect();
    log::debug!(
        "scanned {} lines into {} regions",
        index.line_count(),
        regions.len()
    );
    regions
}
