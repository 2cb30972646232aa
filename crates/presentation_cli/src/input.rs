//! Interactive command parsing
//!
//! One line of terminal input becomes one [`ShellCommand`].

use application::ShellCommand;
use domain::TransportMode;

/// Help text for the interactive mode
pub const HELP: &str = "\
Commands:
  type <text>          replace the search text (suggestions follow)
  clear                empty the search box
  search               search for the current text
  pick <n>             choose suggestion n (1-based)
  dismiss              close the suggestion list
  tap                  tap the map background
  mode                 toggle search / directions
  layer                toggle standard / hybrid map
  transport <mode>     walk, bike or car
  origin <text>        directions origin field
  destination <text>   directions destination field
  recenter             center the map on the device
  help                 show this help
  quit                 exit";

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Forward to the map screen
    Command(ShellCommand),
    /// Print the help text
    Help,
    /// Blank line
    Nothing,
}

/// Parse one line of terminal input
///
/// # Errors
///
/// Returns a message describing the problem for unknown commands or bad
/// arguments.
pub fn parse_line(line: &str) -> Result<InputAction, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(InputAction::Nothing);
    }

    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let command = match word.to_lowercase().as_str() {
        // Text is passed through untrimmed; the search box trims on lookup
        "type" | "t" => ShellCommand::TypeQuery(rest.to_string()),
        "clear" => ShellCommand::TypeQuery(String::new()),
        "search" | "s" => ShellCommand::SubmitSearch,
        "pick" | "p" => ShellCommand::SelectSuggestion(parse_index(rest)?),
        "dismiss" => ShellCommand::DismissSuggestions,
        "tap" => ShellCommand::TapBackground,
        "mode" => ShellCommand::ToggleViewMode,
        "layer" => ShellCommand::ToggleMapLayer,
        "transport" => ShellCommand::SelectTransportMode(rest.trim().parse::<TransportMode>()?),
        "origin" => ShellCommand::EditOrigin(rest.trim().to_string()),
        "destination" | "dest" => ShellCommand::EditDestination(rest.trim().to_string()),
        "recenter" | "r" => ShellCommand::Recenter,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        "help" | "?" => return Ok(InputAction::Help),
        other => return Err(format!("Unknown command: {other}. Type 'help' for a list")),
    };
    Ok(InputAction::Command(command))
}

/// 1-based suggestion number to a list index
fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Expected a suggestion number, got '{}'", arg.trim())),
    }
}
