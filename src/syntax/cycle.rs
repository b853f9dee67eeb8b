//! State cycling
//!
//! Advances the token at the start of a line to the next entry of the
//! rotation, keeping indentation and the rest of the line untouched.

use super::tokens::TokenSet;

/// Split a line into its indentation (leading tabs and spaces) and the
/// remainder
pub fn split_indent(line: &str) -> (&str, &str) {
    let end = line
        .find(|ch: char| ch != ' ' && ch != '\t')
        .unwrap_or(line.len());
    line.split_at(end)
}

/// Return `line` with its leading token advanced to the next state
///
/// A line without a rotation token gets the first state's token.
pub fn cycle(line: &str, tokens: &TokenSet) -> String {
    let (indent, rest) = split_indent(line);
    let rotation = tokens.rotation();

    match tokens.rotation_prefix(rest) {
        Some(current) => {
            let next = &rotation[(current + 1) % rotation.len()];
            let body = &rest[rotation[current].len()..];
            format!("{indent}{next}{body}")
        }
        None => format!("{indent}{}{rest}", rotation[0]),
    }
}
