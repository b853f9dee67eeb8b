//! todo-highlight - highlight and cycle states in .todo files

use std::env;
use std::process;

use todo_highlight::command::{self, Command};
use todo_highlight::error::Result;
use todo_highlight::terminal::Terminal;
use todo_highlight::Config;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let invocation = command::parse_args(env::args().skip(1))?;

    let config = match (&invocation.command, &invocation.config) {
        (Command::Help | Command::Version, _) => Config::default(),
        (_, Some(path)) => Config::load_from_path(path)?,
        (_, None) => Config::load()?,
    };
    log::debug!("using states {:?}", config.states);

    let mut term = Terminal::stdout();
    command::execute(&invocation.command, &config, &mut term)
}
