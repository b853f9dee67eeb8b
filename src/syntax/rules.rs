//! Line-start pattern for state tokens
//!
//! This module builds the single multiline regex used to find state
//! tokens at the start of lines, and escapes token literals so their
//! characters are matched verbatim.

use regex::Regex;

use crate::error::Result;

/// Escape a literal so it can be embedded in a pattern
pub fn escape(text: &str) -> String {
    regex::escape(text)
}

/// Build the line-start pattern source
///
/// Group 1 is the indentation, group 2 the token. Alternatives are listed
/// longest first so that a token can never be shadowed by one of its
/// prefixes; ties keep their given order with the comment marker leading.
pub fn build_pattern(tokens: &[&str], comment: &str) -> String {
    let mut alternatives: Vec<&str> = Vec::with_capacity(tokens.len() + 1);
    alternatives.push(comment);
    alternatives.extend_from_slice(tokens);
    alternatives.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let alternation = alternatives
        .iter()
        .map(|token| escape(token))
        .collect::<Vec<_>>()
        .join("|");

    format!(r"(?m)^([\t ]*)({alternation})")
}

/// A token found at the start of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch<'t> {
    /// Byte offset in the document where the match (and its line) begins
    pub offset: usize,
    /// Indentation followed by the token
    pub literal: &'t str,
    /// Length in bytes of the indentation part of `literal`
    indent_len: usize,
}

impl<'t> TokenMatch<'t> {
    /// Leading tabs and spaces
    pub fn indent(&self) -> &'t str {
        &self.literal[..self.indent_len]
    }

    /// The matched token itself
    pub fn token(&self) -> &'t str {
        &self.literal[self.indent_len..]
    }
}

/// Compiled line-start pattern
#[derive(Debug, Clone)]
pub struct LinePattern {
    regex: Regex,
}

impl LinePattern {
    /// Compile the pattern for a token list and comment marker
    pub fn new(tokens: &[&str], comment: &str) -> Result<Self> {
        let source = build_pattern(tokens, comment);
        log::debug!("line pattern: {source}");
        Ok(Self {
            regex: Regex::new(&source)?,
        })
    }

    /// All token matches in document order
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = TokenMatch<'t>> + 'r
    where
        't: 'r,
    {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let indent = caps.get(1)?;
            Some(TokenMatch {
                offset: whole.start(),
                literal: whole.as_str(),
                indent_len: indent.len(),
            })
        })
    }
}
