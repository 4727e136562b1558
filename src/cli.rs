//! Command-line interface definition for Kaiwa
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, the completion endpoint
//! server, and history management.

use clap::{Parser, Subcommand};

/// Kaiwa - Interactive AI chat client
///
/// Chat with a hosted language model from the terminal, with
/// conversation history persisted locally.
#[derive(Parser, Debug, Clone)]
#[command(name = "kaiwa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the history database location
    #[arg(long, env = "KAIWA_HISTORY_DB")]
    pub storage_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Kaiwa
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Resume a saved history (full id or 8-char prefix)
        #[arg(short, long)]
        resume: Option<String>,
    },

    /// Run the completion endpoint server
    Serve {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Manage saved conversation histories
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List saved histories
    List,

    /// Delete a saved history (full id or 8-char prefix)
    Delete {
        /// History id
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
