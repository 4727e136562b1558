/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`    — Interactive chat session
- `serve`   — Completion endpoint server
- `history` — Saved history listing and deletion

These handlers are intentionally small and use the library components:
the session, the gateway, and the providers.
*/

pub mod chat;
pub mod history;
pub mod serve;
pub mod special_commands;

use crate::config::Config;
use crate::error::Result;
use crate::session::{ChatHistory, HistorySlot};
use colored::Colorize;
use prettytable::{format, Table};

/// Open the history slot honoring the configured path override
pub(crate) fn open_slot(config: &Config) -> Result<HistorySlot> {
    match &config.storage.path {
        Some(path) => HistorySlot::open(path.clone()),
        None => HistorySlot::open_default(),
    }
}

/// Render saved histories as a table
///
/// The current history, when given, is marked in the listing.
pub(crate) fn print_history_table(histories: &[ChatHistory], current_id: Option<&str>) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Last Updated".bold()
    ]);

    for history in histories {
        let id_short = &history.id[..8];
        let marker = if current_id == Some(history.id.as_str()) {
            "* "
        } else {
            ""
        };
        let updated = history.updated_at.format("%Y-%m-%d %H:%M").to_string();

        table.add_row(prettytable::row![
            id_short.cyan(),
            format!("{}{}", marker, history.title),
            history.messages.len(),
            updated
        ]);
    }

    println!("\nConversation History:");
    table.printstd();
    println!();
}
