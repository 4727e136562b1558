//! Interactive chat mode handler
//!
//! Runs a readline-based loop that submits user input to the
//! conversation session and renders the transcript. Slash commands
//! cover the history panel actions (new, list, open, delete, title).

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::commands::{open_slot, print_history_table};
use crate::config::Config;
use crate::error::{KaiwaError, Result};
use crate::gateway::CompletionGateway;
use crate::providers::create_provider;
use crate::session::{ChatSession, Message, Role, SubmitOutcome};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `resume` - Optional saved history to resume (full id or prefix)
pub async fn run_chat(config: Config, resume: Option<String>) -> Result<()> {
    let provider = create_provider(&config.provider)?;
    let gateway = Arc::new(CompletionGateway::new(
        provider,
        config.chat.system_prompt.clone(),
    ));
    let slot = open_slot(&config)?;
    let mut session = ChatSession::new(gateway, slot);
    session.subscribe(|| tracing::trace!("session state changed"));

    if let Some(prefix) = resume {
        match session.resolve_id(&prefix) {
            Some(id) => {
                session.select_history(&id);
                print_transcript(session.messages());
            }
            None => {
                println!("{}", format!("No saved history matches {}", prefix).yellow());
            }
        }
    }

    print_welcome_banner(&session);

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                match parse_special_command(trimmed) {
                    Ok(SpecialCommand::New) => {
                        session.new_chat()?;
                        println!("{}", "Started a new chat".green());
                        continue;
                    }
                    Ok(SpecialCommand::List) => {
                        print_history_table(session.histories(), session.current_history_id());
                        continue;
                    }
                    Ok(SpecialCommand::Open(prefix)) => {
                        match session.resolve_id(&prefix) {
                            Some(id) => {
                                session.select_history(&id);
                                print_transcript(session.messages());
                            }
                            None => println!(
                                "{}",
                                format!("No saved history matches {}", prefix).yellow()
                            ),
                        }
                        continue;
                    }
                    Ok(SpecialCommand::Delete(prefix)) => {
                        match session.resolve_id(&prefix) {
                            Some(id) => {
                                session.delete_history(&id)?;
                                println!("{}", format!("Deleted history {}", &id[..8]).green());
                            }
                            None => println!(
                                "{}",
                                format!("No saved history matches {}", prefix).yellow()
                            ),
                        }
                        continue;
                    }
                    Ok(SpecialCommand::Title(text)) => {
                        match session.current_history_id().map(str::to_string) {
                            Some(id) => {
                                session.set_history_title(&id, &text)?;
                                println!("{}", "Renamed current history".green());
                            }
                            None => {
                                println!("{}", "No active history to rename".yellow());
                            }
                        }
                        continue;
                    }
                    Ok(SpecialCommand::Help) => {
                        print_help();
                        continue;
                    }
                    Ok(SpecialCommand::Exit) => break,
                    Ok(SpecialCommand::None) => {}
                    Err(e) => {
                        println!("{}", e.to_string().yellow());
                        continue;
                    }
                }

                match session.append_exchange(trimmed).await {
                    Ok(SubmitOutcome::Completed) => {
                        let messages = session.messages();
                        for message in &messages[messages.len().saturating_sub(2)..] {
                            print_message(message);
                        }
                    }
                    Ok(SubmitOutcome::Rejected) => {}
                    Err(e) => {
                        tracing::warn!("Exchange failed: {:#}", e);
                        match e.downcast_ref::<KaiwaError>() {
                            Some(KaiwaError::MissingCredentials(var)) => {
                                eprintln!(
                                    "{}",
                                    format!("Missing API credential: set {}", var).red()
                                );
                            }
                            _ => {
                                eprintln!("{}", "Failed to get a response, please retry".red());
                            }
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Display the welcome banner with session stats
fn print_welcome_banner(session: &ChatSession) {
    println!("{}", "Kaiwa".bold().blue());
    println!(
        "{} saved histories. Type '/help' for commands.\n",
        session.histories().len()
    );
}

/// Render a full transcript
fn print_transcript(messages: &[Message]) {
    println!();
    for message in messages {
        print_message(message);
    }
}

/// Render one transcript line with role label and local HH:MM stamp
fn print_message(message: &Message) {
    let stamp = message
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M");
    let label = match message.role {
        Role::User => "you".green(),
        Role::Assistant => "assistant".blue(),
    };
    println!("[{}] {}: {}", stamp, label, message.content);
}
