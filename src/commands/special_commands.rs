//! Special commands parser for interactive chat mode
//!
//! This module parses the slash commands available during interactive
//! chat sessions. Special commands drive the history side panel actions:
//! starting a new chat, listing, opening and deleting saved histories,
//! and renaming the current one.
//!
//! Commands are prefixed with `/` and are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands modify the session state or provide information,
/// rather than being submitted as a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a new, empty chat
    New,

    /// List saved histories
    List,

    /// Open a saved history (full id or prefix)
    Open(String),

    /// Delete a saved history (full id or prefix)
    Delete(String),

    /// Rename the current history
    Title(String),

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; submit the input as a conversation turn
    None,
}

/// Parse a user input string into a special command
///
/// # Examples
///
/// ```
/// use kaiwa::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/new"), Ok(SpecialCommand::New));
/// assert_eq!(
///     parse_special_command("hello there"),
///     Ok(SpecialCommand::None)
/// );
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match command.as_str() {
        "/new" => Ok(SpecialCommand::New),
        "/list" | "/histories" => Ok(SpecialCommand::List),
        "/open" | "/select" => {
            if argument.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/open".to_string(),
                    usage: "/open <id>".to_string(),
                })
            } else {
                Ok(SpecialCommand::Open(argument.to_string()))
            }
        }
        "/delete" | "/rm" => {
            if argument.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/delete".to_string(),
                    usage: "/delete <id>".to_string(),
                })
            } else {
                Ok(SpecialCommand::Delete(argument.to_string()))
            }
        }
        "/title" | "/rename" => {
            if argument.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/title".to_string(),
                    usage: "/title <text>".to_string(),
                })
            } else {
                Ok(SpecialCommand::Title(argument.to_string()))
            }
        }
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" | "/q" => Ok(SpecialCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Print help for the available special commands
pub fn print_help() {
    println!("\nAvailable commands:");
    println!("  /new             Start a new chat");
    println!("  /list            List saved histories");
    println!("  /open <id>       Open a saved history");
    println!("  /delete <id>     Delete a saved history");
    println!("  /title <text>    Rename the current history");
    println!("  /help            Show this help");
    println!("  /exit            Leave the session");
    println!("\nAnything else is sent to the assistant.\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_is_none() {
        assert_eq!(
            parse_special_command("tell me a joke"),
            Ok(SpecialCommand::None)
        );
    }

    #[test]
    fn test_parse_new() {
        assert_eq!(parse_special_command("/new"), Ok(SpecialCommand::New));
        assert_eq!(parse_special_command("/NEW"), Ok(SpecialCommand::New));
    }

    #[test]
    fn test_parse_list_aliases() {
        assert_eq!(parse_special_command("/list"), Ok(SpecialCommand::List));
        assert_eq!(
            parse_special_command("/histories"),
            Ok(SpecialCommand::List)
        );
    }

    #[test]
    fn test_parse_open_with_id() {
        assert_eq!(
            parse_special_command("/open abcd1234"),
            Ok(SpecialCommand::Open("abcd1234".to_string()))
        );
    }

    #[test]
    fn test_parse_open_without_id() {
        assert!(matches!(
            parse_special_command("/open"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_delete_aliases() {
        assert_eq!(
            parse_special_command("/delete abcd1234"),
            Ok(SpecialCommand::Delete("abcd1234".to_string()))
        );
        assert_eq!(
            parse_special_command("/rm abcd1234"),
            Ok(SpecialCommand::Delete("abcd1234".to_string()))
        );
    }

    #[test]
    fn test_parse_title_keeps_argument_verbatim() {
        assert_eq!(
            parse_special_command("/title Weekend trip ideas"),
            Ok(SpecialCommand::Title("Weekend trip ideas".to_string()))
        );
    }

    #[test]
    fn test_parse_exit_aliases() {
        assert_eq!(parse_special_command("/exit"), Ok(SpecialCommand::Exit));
        assert_eq!(parse_special_command("/quit"), Ok(SpecialCommand::Exit));
        assert_eq!(parse_special_command("/q"), Ok(SpecialCommand::Exit));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(
            parse_special_command("/frobnicate"),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_leading_whitespace_is_tolerated() {
        assert_eq!(parse_special_command("  /new  "), Ok(SpecialCommand::New));
    }
}
