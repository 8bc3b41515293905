// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    /// Fetch the archive again and reset the results.
    Reload,
    /// Empty the query bar and the results table.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Nothing was typed; the bar just closes.
    #[error("")]
    Empty,
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown command: {0}")]
    Unknown(String),
}

impl Command {
    /// Parse the text typed after the `:` prefix.
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" => Ok(Command::Quit),
            "help" | "h" => Ok(Command::Help),
            "reload" | "r" => Ok(Command::Reload),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("theme <default|gruvbox>"))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns an error message for the command bar when the command could not
/// be applied.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => {
                tracing::debug!(theme = %name, "theme switched");
                s.theme = theme;
            }
            None => return Err(format!("unknown theme: {name}")),
        },
        Command::Reload => s.reload_requested = true,
        Command::Clear => {
            s.query.input.clear();
            s.results.clear();
        }
    }
    Ok(())
}
