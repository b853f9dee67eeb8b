//! todo-highlight - state highlighting and state cycling for `.todo` files
//!
//! Every line of a todo file may start, after its indentation, with a
//! state token: `- ` (todo), `+ ` (done), `-> ` (outcome), or the `--`
//! comment marker. [`scan`] splits a document into regions by state and
//! [`cycle`] advances one line to the next state.
//!
//! ```
//! use todo_highlight::{cycle, scan, TokenSet};
//!
//! let tokens = TokenSet::standard()?;
//! let regions = scan("- a\n-- note\n+ b", &tokens);
//! assert_eq!(regions.len(), 2);
//! assert_eq!(cycle("-> outcome", &tokens), "-- outcome");
//! # Ok::<(), todo_highlight::TodoError>(())
//! ```

pub mod command;
pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod line;
pub mod syntax;
pub mod terminal;

pub use config::Config;
pub use document::TodoDocument;
pub use error::{Result, TodoError};
pub use line::LineIndex;
pub use syntax::{cycle, find_decoration, scan, scan_spans, Region, RegionSpan, StateToken, TokenSet};
