//! Todo syntax
//!
//! This module provides the state-token machinery used for:
//! - Region scanning (which lines belong to which state)
//! - State cycling (advancing a line's leading token)
//! - Styling of highlighted regions

mod cycle;
mod rules;
mod scanner;
mod style;
mod tokens;

pub use cycle::{cycle, split_indent};
pub use rules::{build_pattern, escape, LinePattern, TokenMatch};
pub use scanner::{find_decoration, scan, scan_spans, Region, RegionSpan};
pub use style::{Rgba, StateStyle};
pub use tokens::{standard_states, StateToken, TokenSet, DEFAULT_COMMENT, ROTATION_SEPARATOR};
