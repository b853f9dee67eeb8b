//! State tokens
//!
//! A [`TokenSet`] is the immutable configuration shared by scanning and
//! cycling: the ordered state tokens, the comment marker, the compiled
//! line pattern and the cycle rotation. Reloading configuration means
//! building a new one.

use std::collections::HashSet;

use super::rules::LinePattern;
use crate::error::{Result, TodoError};

/// Default comment marker
pub const DEFAULT_COMMENT: &str = "--";

/// Separator written after the comment marker when it takes part in the
/// cycle rotation
pub const ROTATION_SEPARATOR: char = ' ';

/// A named state and the token that opens it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateToken {
    /// State name (e.g. "todo", "done")
    pub name: String,
    /// Literal token (e.g. "- ")
    pub token: String,
}

impl StateToken {
    pub fn new(name: &str, token: &str) -> Self {
        Self {
            name: name.to_string(),
            token: token.to_string(),
        }
    }
}

/// The three standard states: todo, done, outcome
pub fn standard_states() -> Vec<StateToken> {
    vec![
        StateToken::new("todo", "- "),
        StateToken::new("done", "+ "),
        StateToken::new("outcome", "-> "),
    ]
}

/// Validated token configuration
#[derive(Debug, Clone)]
pub struct TokenSet {
    states: Vec<StateToken>,
    comment: String,
    rotation: Vec<String>,
    pattern: LinePattern,
}

impl TokenSet {
    /// Build and validate a token set
    pub fn new(states: Vec<StateToken>, comment: &str) -> Result<Self> {
        if states.is_empty() {
            return Err(TodoError::NoStates);
        }

        let mut rotation: Vec<String> = states.iter().map(|s| s.token.clone()).collect();
        rotation.push(format!("{comment}{ROTATION_SEPARATOR}"));

        validate(&states, comment, &rotation)?;

        let tokens: Vec<&str> = states.iter().map(|s| s.token.as_str()).collect();
        let pattern = LinePattern::new(&tokens, comment)?;

        Ok(Self {
            states,
            comment: comment.to_string(),
            rotation,
            pattern,
        })
    }

    /// The standard todo/done/outcome states with the `--` comment marker
    pub fn standard() -> Result<Self> {
        Self::new(standard_states(), DEFAULT_COMMENT)
    }

    /// States in configured order
    pub fn states(&self) -> &[StateToken] {
        &self.states
    }

    /// State by index
    pub fn state(&self, index: usize) -> Option<&StateToken> {
        self.states.get(index)
    }

    /// Comment marker
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Cycle order: state tokens followed by the comment entry
    pub fn rotation(&self) -> &[String] {
        &self.rotation
    }

    /// Compiled line-start pattern
    pub fn pattern(&self) -> &LinePattern {
        &self.pattern
    }

    /// Index of the first state whose token `literal` ends with
    ///
    /// Suffix identity: a matched literal is indentation followed by a
    /// token, so its ending names the token. `None` for comment literals.
    pub fn state_ending(&self, literal: &str) -> Option<usize> {
        self.states
            .iter()
            .position(|state| literal.ends_with(state.token.as_str()))
    }

    /// Index of the first rotation entry that `text` starts with
    ///
    /// Prefix identity: the entry's exact characters are what cycling
    /// strips off.
    pub fn rotation_prefix(&self, text: &str) -> Option<usize> {
        self.rotation
            .iter()
            .position(|entry| text.starts_with(entry.as_str()))
    }
}

fn check_literal(name: &str, literal: &str) -> Result<()> {
    if literal.is_empty() {
        return Err(TodoError::EmptyToken(name.to_string()));
    }
    if literal.starts_with([' ', '\t']) || literal.contains(['\n', '\r']) {
        return Err(TodoError::InvalidToken(literal.to_string()));
    }
    Ok(())
}

/// `Some((shorter, longer))` when one literal is a prefix of the other
fn prefix_overlap<'a>(a: &'a str, b: &'a str) -> Option<(&'a str, &'a str)> {
    if b.starts_with(a) {
        Some((a, b))
    } else if a.starts_with(b) {
        Some((b, a))
    } else {
        None
    }
}

/// `Some((shorter, longer))` when one literal is a suffix of the other
fn suffix_overlap<'a>(a: &'a str, b: &'a str) -> Option<(&'a str, &'a str)> {
    if b.ends_with(a) {
        Some((a, b))
    } else if a.ends_with(b) {
        Some((b, a))
    } else {
        None
    }
}

fn overlapping(shorter: &str, longer: &str) -> TodoError {
    TodoError::OverlappingTokens {
        shorter: shorter.to_string(),
        longer: longer.to_string(),
    }
}

/// Reject token sets that would make matching ambiguous.
///
/// Line-start alternatives (tokens and comment) must be free of prefix
/// and suffix relations; rotation entries must be prefix-free.
fn validate(states: &[StateToken], comment: &str, rotation: &[String]) -> Result<()> {
    for state in states {
        check_literal(&state.name, &state.token)?;
    }
    check_literal("comment", comment)?;

    let mut alternatives: Vec<&str> = states.iter().map(|s| s.token.as_str()).collect();
    alternatives.push(comment);

    let mut seen = HashSet::new();
    for literal in &alternatives {
        if !seen.insert(*literal) {
            return Err(TodoError::DuplicateToken(literal.to_string()));
        }
    }

    for (i, a) in alternatives.iter().enumerate() {
        for b in &alternatives[i + 1..] {
            if let Some((shorter, longer)) = prefix_overlap(a, b).or_else(|| suffix_overlap(a, b)) {
                return Err(overlapping(shorter, longer));
            }
        }
    }

    for (i, a) in rotation.iter().enumerate() {
        for b in &rotation[i + 1..] {
            if let Some((shorter, longer)) = prefix_overlap(a, b) {
                return Err(overlapping(shorter, longer));
            }
        }
    }

    Ok(())
}
