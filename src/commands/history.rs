//! History management command handlers

use crate::cli::HistoryCommand;
use crate::commands::{open_slot, print_history_table};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// Handle history commands
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let slot = open_slot(config)?;
    let histories = slot.load();

    match command {
        HistoryCommand::List => {
            if histories.is_empty() {
                println!("{}", "No conversation history found.".yellow());
                return Ok(());
            }

            print_history_table(&histories, None);
            println!(
                "Use {} to resume a session.",
                "kaiwa chat --resume <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Delete { id } => {
            let mut matches = histories.iter().filter(|h| h.id.starts_with(&id));
            let Some(found) = matches.next() else {
                println!("{}", format!("No saved history matches {}", id).yellow());
                return Ok(());
            };
            if matches.next().is_some() {
                println!("{}", format!("Prefix {} is ambiguous", id).yellow());
                return Ok(());
            }

            let target = found.id.clone();
            let remaining: Vec<_> = histories.into_iter().filter(|h| h.id != target).collect();
            slot.save(&remaining)?;
            println!("{}", format!("Deleted conversation {}", target).green());
        }
    }

    Ok(())
}
