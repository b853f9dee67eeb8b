//! Command-line commands
//!
//! Parses the argument list into an [`Invocation`] and runs it against a
//! loaded [`Config`], writing everything through a [`Terminal`].

use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::display::Display;
use crate::document::TodoDocument;
use crate::error::{Result, TodoError};
use crate::terminal::Terminal;

/// An inclusive, 1-based line range as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Parse `N` or `N:M`
    pub fn parse(text: &str) -> Result<Self> {
        let bad = || TodoError::Usage(format!("Invalid line range: {text}"));
        let number = |s: &str| s.trim().parse::<usize>().ok().filter(|n| *n > 0);

        let (start, end) = match text.split_once(':') {
            Some((start, end)) => (number(start).ok_or_else(bad)?, number(end).ok_or_else(bad)?),
            None => {
                let line = number(text).ok_or_else(bad)?;
                (line, line)
            }
        };
        if end < start {
            return Err(bad());
        }
        Ok(Self { start, end })
    }

    /// Check the range against a document's line count
    pub fn check(&self, line_count: usize) -> Result<()> {
        if self.end > line_count {
            return Err(TodoError::LineOutOfRange {
                line: self.end,
                count: line_count,
            });
        }
        Ok(())
    }

    /// Zero-based line indices covered by the range
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.start - 1)..self.end
    }
}

/// What to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the regions of a file
    Scan { file: PathBuf },
    /// Render a file with highlights
    Show { file: PathBuf, line_numbers: bool },
    /// Cycle the state of lines in a file
    Toggle { file: PathBuf, ranges: Vec<LineRange> },
    /// Print the effective configuration
    Config,
    Help,
    Version,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Config file override
    pub config: Option<PathBuf>,
    pub command: Command,
}

/// Parse arguments (without the program name)
pub fn parse_args<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut config = None;
    let mut line_numbers = false;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                return Ok(Invocation {
                    config,
                    command: Command::Help,
                })
            }
            "--version" | "-V" => {
                return Ok(Invocation {
                    config,
                    command: Command::Version,
                })
            }
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| TodoError::Usage("--config needs a path".to_string()))?;
                config = Some(PathBuf::from(path));
            }
            "--line-numbers" | "-n" => line_numbers = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(TodoError::Usage(format!("Unknown option: {flag}")));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().unwrap_or_else(|| "help".to_string());
    let file = |p: Option<String>| {
        p.map(PathBuf::from)
            .ok_or_else(|| TodoError::Usage(format!("{name} needs a file")))
    };

    let command = match name.as_str() {
        "scan" => Command::Scan {
            file: file(positional.next())?,
        },
        "show" => Command::Show {
            file: file(positional.next())?,
            line_numbers,
        },
        "toggle" => {
            let file = file(positional.next())?;
            let ranges = positional
                .by_ref()
                .map(|r| LineRange::parse(&r))
                .collect::<Result<Vec<_>>>()?;
            if ranges.is_empty() {
                return Err(TodoError::Usage("toggle needs at least one line".to_string()));
            }
            Command::Toggle { file, ranges }
        }
        "config" => Command::Config,
        "help" => Command::Help,
        other => return Err(TodoError::Usage(format!("Unknown command: {other}"))),
    };

    if let Some(extra) = positional.next() {
        return Err(TodoError::Usage(format!("Unexpected argument: {extra}")));
    }

    Ok(Invocation { config, command })
}

/// Run a command
pub fn execute<W: Write>(command: &Command, config: &Config, term: &mut Terminal<W>) -> Result<()> {
    match command {
        Command::Scan { file } => {
            if !config.is_todo_file(file) {
                log::warn!("{} is not a .{} file, skipping", file.display(), config.extension);
                return Ok(());
            }
            let tokens = config.token_set()?;
            let doc = TodoDocument::from_file(file)?;
            for region in doc.regions(&tokens) {
                let name = tokens.state(region.state).map_or("?", |s| s.name.as_str());
                term.write_str(&format!(
                    "{} {}-{}",
                    name,
                    region.start_line + 1,
                    region.end_line + 1
                ))?;
                term.newline()?;
            }
            term.flush()
        }
        Command::Show { file, line_numbers } => {
            let doc = TodoDocument::from_file(file)?;
            let display = Display {
                show_line_numbers: *line_numbers,
                ..Display::default()
            };
            let regions = if config.is_todo_file(file) {
                doc.regions(&config.token_set()?)
            } else {
                log::warn!("{} is not a .{} file, not highlighting", file.display(), config.extension);
                Vec::new()
            };
            display.render(term, &doc, &regions, &config.styles())
        }
        Command::Toggle { file, ranges } => {
            if !config.is_todo_file(file) {
                log::warn!("{} is not a .{} file, nothing toggled", file.display(), config.extension);
                return Ok(());
            }
            let tokens = config.token_set()?;
            let mut doc = TodoDocument::from_file(file)?;
            for range in ranges {
                range.check(doc.line_count())?;
            }
            let lines: Vec<usize> = ranges.iter().flat_map(LineRange::indices).collect();
            let changed = doc.cycle_lines(&lines, &tokens)?;
            doc.save()?;
            term.write_str(&format!("Toggled {changed} line(s)"))?;
            term.newline()?;
            term.flush()
        }
        Command::Config => {
            term.write_str(&config.to_toml()?)?;
            term.flush()
        }
        Command::Help => {
            term.write_str(&usage())?;
            term.flush()
        }
        Command::Version => {
            term.write_str(&format!("todo-highlight {}\n", env!("CARGO_PKG_VERSION")))?;
            term.flush()
        }
    }
}

/// Help text
pub fn usage() -> String {
    format!(
        "todo-highlight {} - highlight and cycle states in .todo files\n\
         \n\
         Usage: todo-highlight [OPTIONS] <COMMAND>\n\
         \n\
         Commands:\n\
         \x20 scan FILE                 Print the highlighted regions of FILE\n\
         \x20 show FILE                 Render FILE with highlights\n\
         \x20 toggle FILE LINE[:END]... Cycle the state of the given lines\n\
         \x20 config                    Print the effective configuration\n\
         \n\
         Options:\n\
         \x20 -c, --config PATH  Use PATH instead of ~/.todo-highlight.toml\n\
         \x20 -n, --line-numbers Show line numbers (show)\n\
         \x20 -h, --help         Show this help message\n\
         \x20 -V, --version      Show version information\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(command: &Command) -> String {
        let mut term = Terminal::new(Vec::new(), 40);
        execute(command, &Config::default(), &mut term).unwrap();
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn test_line_range_parse() {
        assert_eq!(LineRange::parse("3").unwrap(), LineRange { start: 3, end: 3 });
        assert_eq!(LineRange::parse("2:5").unwrap(), LineRange { start: 2, end: 5 });
        assert!(LineRange::parse("0").is_err());
        assert!(LineRange::parse("5:2").is_err());
        assert!(LineRange::parse("a").is_err());
        assert_eq!(
            LineRange { start: 2, end: 4 }.indices().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(LineRange { start: 2, end: 4 }.check(4).is_ok());
        assert!(matches!(
            LineRange { start: 2, end: 5 }.check(4),
            Err(TodoError::LineOutOfRange { line: 5, count: 4 })
        ));
    }

    #[test]
    fn test_parse_commands() {
        let inv = parse_args(args(&["-c", "my.toml", "toggle", "a.todo", "1", "3:4"])).unwrap();
        assert_eq!(inv.config, Some(PathBuf::from("my.toml")));
        assert_eq!(
            inv.command,
            Command::Toggle {
                file: PathBuf::from("a.todo"),
                ranges: vec![LineRange { start: 1, end: 1 }, LineRange { start: 3, end: 4 }],
            }
        );

        let inv = parse_args(args(&["show", "-n", "a.todo"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Show {
                file: PathBuf::from("a.todo"),
                line_numbers: true
            }
        );

        assert_eq!(parse_args(args(&[])).unwrap().command, Command::Help);
        assert_eq!(parse_args(args(&["-V"])).unwrap().command, Command::Version);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_args(args(&["scan"])), Err(TodoError::Usage(_))));
        assert!(matches!(parse_args(args(&["toggle", "a.todo"])), Err(TodoError::Usage(_))));
        assert!(matches!(parse_args(args(&["frobnicate"])), Err(TodoError::Usage(_))));
        assert!(matches!(parse_args(args(&["--bogus"])), Err(TodoError::Usage(_))));
        assert!(matches!(parse_args(args(&["scan", "a.todo", "b"])), Err(TodoError::Usage(_))));
    }

    #[test]
    fn test_scan_prints_regions() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("list.todo");
        std::fs::write(&file, "- a\n  more\n-- note\n+ b\n-> c").unwrap();

        let out = run(&Command::Scan { file });
        assert_eq!(out, "todo 1-2\ndone 4-4\noutcome 5-5\n");
    }

    #[test]
    fn test_scan_skips_other_extensions() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("list.md");
        std::fs::write(&file, "- a\n").unwrap();
        assert_eq!(run(&Command::Scan { file }), "");
    }

    #[test]
    fn test_toggle_writes_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("list.todo");
        std::fs::write(&file, "- a\n+ b\n-> c\nplain\n").unwrap();

        let out = run(&Command::Toggle {
            file: file.clone(),
            ranges: vec![LineRange { start: 1, end: 2 }, LineRange { start: 2, end: 4 }],
        });
        assert_eq!(out, "Toggled 4 line(s)\n");
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "+ a\n-> b\n-- c\n- plain\n"
        );
    }

    #[test]
    fn test_toggle_rejects_range_past_end() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("list.todo");
        std::fs::write(&file, "- a\n+ b").unwrap();

        let mut term = Terminal::new(Vec::new(), 40);
        let result = execute(
            &Command::Toggle {
                file: file.clone(),
                ranges: vec![LineRange::parse("1:18446744073709551615").unwrap()],
            },
            &Config::default(),
            &mut term,
        );
        assert!(matches!(
            result,
            Err(TodoError::LineOutOfRange { line: usize::MAX, count: 2 })
        ));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "- a\n+ b");
        assert!(term.into_inner().is_empty());
    }

    #[test]
    fn test_toggle_ignores_other_extensions() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "- a\n").unwrap();

        assert_eq!(
            run(&Command::Toggle {
                file: file.clone(),
                ranges: vec![LineRange { start: 1, end: 1 }],
            }),
            ""
        );
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "- a\n");
    }

    #[test]
    fn test_config_command_prints_toml() {
        let out = run(&Command::Config);
        assert!(out.contains("extension = \"todo\""));
        assert!(out.contains("[[states]]"));
    }
}
