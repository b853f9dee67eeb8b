//! Configuration file support
//!
//! Loads settings from ~/.todo-highlight.toml (or
//! %USERPROFILE%\.todo-highlight.toml on Windows). A missing file means
//! defaults.
//!
//! Example:
//! ```toml
//! extension = "todo"
//! comment = "--"
//! todoColor = "rgb(230, 130, 130, 0.3)"
//! doneColor = "rgb(130, 230, 130, 0.3)"
//! outcomeColor = "rgb(130, 130, 230, 0.3)"
//!
//! [[states]]
//! name = "todo"
//! token = "- "
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};
use crate::syntax::{standard_states, Rgba, StateStyle, StateToken, TokenSet, DEFAULT_COMMENT};

const CONFIG_FILE: &str = ".todo-highlight.toml";

/// Opacity the done state is drawn with unless configured otherwise
const DONE_OPACITY: f32 = 0.4;

/// One configured state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    pub name: String,
    pub token: String,
    /// Background; falls back to the named `*Color` option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruler: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl From<StateToken> for StateConfig {
    fn from(state: StateToken) -> Self {
        Self {
            name: state.name,
            token: state.token,
            color: None,
            ruler: None,
            opacity: None,
        }
    }
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Files whose name ends with `.<extension>` are highlighted
    pub extension: String,
    /// Comment marker
    pub comment: String,
    pub todo_color: Rgba,
    pub done_color: Rgba,
    pub outcome_color: Rgba,
    /// States in order; order is both lookup and cycle order
    pub states: Vec<StateConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: "todo".to_string(),
            comment: DEFAULT_COMMENT.to_string(),
            todo_color: Rgba::rgb(230, 130, 130).with_alpha(0.3),
            done_color: Rgba::rgb(130, 230, 130).with_alpha(0.3),
            outcome_color: Rgba::rgb(130, 130, 230).with_alpha(0.3),
            states: standard_states().into_iter().map(StateConfig::from).collect(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file; defaults when it does not exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, path)
    }

    /// Parse config file contents
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| TodoError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the validated token set
    pub fn token_set(&self) -> Result<TokenSet> {
        let states = self
            .states
            .iter()
            .map(|s| StateToken::new(&s.name, &s.token))
            .collect();
        TokenSet::new(states, &self.comment)
    }

    /// Styles for each state, in state order
    pub fn styles(&self) -> Vec<StateStyle> {
        self.states.iter().map(|state| self.style_for(state)).collect()
    }

    fn style_for(&self, state: &StateConfig) -> StateStyle {
        let (named_color, named_ruler, named_opacity) = match state.name.as_str() {
            "todo" => (self.todo_color, Rgba::rgb(255, 0, 0), 1.0),
            "done" => (self.done_color, Rgba::rgb(0, 128, 0), DONE_OPACITY),
            "outcome" => (self.outcome_color, Rgba::rgb(0, 0, 255), 1.0),
            _ => (Rgba::rgb(128, 128, 128).with_alpha(0.3), Rgba::rgb(128, 128, 128), 1.0),
        };
        StateStyle::new(
            state.color.unwrap_or(named_color),
            state.ruler.unwrap_or(named_ruler),
        )
        .with_opacity(state.opacity.unwrap_or(named_opacity))
    }

    /// Whether a file gets highlighted and can be toggled
    pub fn is_todo_file(&self, path: &Path) -> bool {
        let suffix = format!(".{}", self.extension);
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        let tokens = config.token_set().unwrap();
        assert_eq!(tokens.rotation(), &["- ", "+ ", "-> ", "-- "]);

        let styles = config.styles();
        assert_eq!(styles.len(), 3);
        assert_eq!(styles[0].background, Rgba::rgb(230, 130, 130).with_alpha(0.3));
        assert_eq!(styles[2].ruler, Rgba::rgb(0, 0, 255));
        assert!(!styles[0].is_dim());
        assert!(styles[1].is_dim());
    }

    #[test]
    fn test_parse_named_colors() {
        let contents = r##"
todoColor = "#ff0000"
doneColor = "rgb(0, 0, 0, 0.5)"
        "##;
        let config = Config::parse(contents, Path::new("test.toml")).unwrap();
        assert_eq!(config.todo_color, Rgba::rgb(255, 0, 0));
        assert_eq!(config.extension, "todo");
        assert_eq!(config.states.len(), 3);
        assert_eq!(config.styles()[1].background, Rgba::rgb(0, 0, 0).with_alpha(0.5));
    }

    #[test]
    fn test_parse_custom_states() {
        let contents = r#"
extension = "tasks"
comment = "//"

[[states]]
name = "open"
token = "[ ] "
color = "rgb(10, 20, 30, 0.2)"

[[states]]
name = "done"
token = "[x] "
opacity = 0.6
        "#;
        let config = Config::parse(contents, Path::new("test.toml")).unwrap();
        let tokens = config.token_set().unwrap();
        assert_eq!(tokens.rotation(), &["[ ] ", "[x] ", "// "]);

        let styles = config.styles();
        assert_eq!(styles[0].background, Rgba::rgb(10, 20, 30).with_alpha(0.2));
        assert_eq!(styles[1].background, config.done_color);
        assert!((styles[1].opacity - 0.6).abs() < f32::EPSILON);
        assert!(config.is_todo_file(Path::new("week.tasks")));
        assert!(!config.is_todo_file(Path::new("week.todo")));
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = Config::parse("todoColor = \"nope\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, TodoError::ConfigParse { ref path, .. } if path == Path::new("bad.toml")));
    }

    #[test]
    fn test_invalid_tokens_rejected_on_build() {
        let mut config = Config::default();
        config.states.push(StateConfig::from(StateToken::new("bad", "-")));
        assert!(config.token_set().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("todoColor"));
        assert_eq!(Config::parse(&text, Path::new("x.toml")).unwrap(), config);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "extension = \"tasks\"").unwrap();
        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.extension, "tasks");

        let missing = Config::load_from_path(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(missing, Config::default());
    }

    #[test]
    fn test_is_todo_file() {
        let config = Config::default();
        assert!(config.is_todo_file(Path::new("/home/me/list.todo")));
        assert!(config.is_todo_file(Path::new("work.todo")));
        assert!(!config.is_todo_file(Path::new("notes.md")));
        assert!(!config.is_todo_file(Path::new("todo")));
    }
}
