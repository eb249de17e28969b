//! Interactive chat command handler
//!
//! Instantiates a transcript-mode session over the HTTP transport and runs
//! a readline-based loop that submits user input to the assistant. Slash
//! commands cover the affordances the web front-end exposes as buttons:
//! attaching and removing a document, and reviewing the transcript.

use crate::attachment::{format_file_size, FileUpload, ACCEPTED_EXTENSIONS};
use crate::config::Config;
use crate::error::{CobaError, Result};
use crate::feature::Feature;
use crate::session::{ConversationSession, SubmitOutcome};
use crate::transcript::{Role, Turn};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;

/// Start an interactive conversation
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `feature_override` - Optional override for the configured chat feature
///
/// # Errors
///
/// Returns error when the feature is unknown or single-shot, or when the
/// readline editor cannot be created. Analysis failures never surface here;
/// they become apology turns inside the session.
pub async fn run_chat(config: Config, feature_override: Option<String>) -> Result<()> {
    let feature_name = feature_override
        .as_deref()
        .unwrap_or(&config.chat.default_feature);
    let feature = Feature::parse_str(feature_name).map_err(CobaError::Config)?;

    let mut session = ConversationSession::over_http(feature, &config.service)?;

    print_banner(&session);

    let mut rl = DefaultEditor::new()?;
    let prompt = format!("[{}] >> ", feature);

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() && session.upload().is_none() {
                    continue;
                }

                if let Some(command) = trimmed.strip_prefix('/') {
                    rl.add_history_entry(trimmed)?;
                    if handle_slash_command(&mut session, command) {
                        break;
                    }
                    continue;
                }

                if !trimmed.is_empty() {
                    rl.add_history_entry(trimmed)?;
                    // The raw line goes into the composer untrimmed; the
                    // submit guard does its own trimmed check.
                    session.set_input(line);
                }

                if !session.can_submit() {
                    continue;
                }

                println!("{}", "Analyzing...".dimmed());
                if session.submit().await == SubmitOutcome::Replied {
                    if let Some(turn) = session.transcript().last() {
                        print_turn(turn);
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

/// Handles a slash command; returns true when the loop should exit
fn handle_slash_command(session: &mut ConversationSession, command: &str) -> bool {
    let mut parts = command.splitn(2, ' ');
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim);

    match name {
        "upload" => match arg {
            Some(path) => attach_file(session, Path::new(path)),
            None => println!("Usage: /upload <path>"),
        },
        "remove" => {
            session.remove_upload();
            println!("Attachment removed");
        }
        "history" => {
            for turn in session.transcript().turns() {
                print_turn(turn);
            }
        }
        "help" => print_help(),
        "quit" | "exit" => return true,
        other => println!("Unknown command: /{} (try /help)", other),
    }
    false
}

fn attach_file(session: &mut ConversationSession, path: &Path) {
    if !session.profile().accepts_documents() {
        println!(
            "{}",
            format!(
                "The {} feature accepts text only",
                session.profile().feature
            )
            .yellow()
        );
        return;
    }
    if !session.can_attach() {
        // Same affordance as the web UI's disabled picker tooltip.
        println!("{}", "Clear text to upload file".yellow());
        return;
    }

    let upload = match FileUpload::from_path(path) {
        Ok(upload) => upload,
        Err(e) => {
            println!("{}", format!("Could not read file: {}", e).red());
            return;
        }
    };

    if !upload.has_accepted_extension() {
        println!(
            "{}",
            format!(
                "Note: expected one of {}; the service may reject this file",
                ACCEPTED_EXTENSIONS.join(", ")
            )
            .yellow()
        );
    }

    let size_label = format_file_size(upload.size());
    let name = upload.name.clone();
    match session.attach(upload) {
        Ok(()) => println!("Attached {} ({}), press Enter to analyze", name, size_label),
        Err(e) => println!("{}", format!("{}", e).red()),
    }
}

fn print_banner(session: &ConversationSession) {
    let profile = session.profile();
    println!("{}", "C.O.B.A".bold().cyan());
    println!("{}", profile.feature.description());
    if profile.accepts_documents() {
        println!(
            "Supports {} (max {})",
            ACCEPTED_EXTENSIONS.join(", "),
            format_file_size(crate::error::MAX_UPLOAD_BYTES)
        );
    }
    println!("Type /help for commands\n");

    for turn in session.transcript().turns() {
        print_turn(turn);
    }
}

fn print_turn(turn: &Turn) {
    let tag = match turn.role {
        Role::User => "you".green(),
        Role::Assistant => "coba".cyan(),
    };
    for attachment in &turn.attachments {
        println!(
            "{} {} ({})",
            tag,
            attachment.name.bold(),
            attachment.size_label
        );
    }
    if !turn.content.is_empty() {
        println!("{} {}", tag, turn.content);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /upload <path>  Attach a document for the next submission");
    println!("  /remove         Remove the attached document");
    println!("  /history        Show the full transcript");
    println!("  /help           Show this help");
    println!("  /quit           Exit");
    println!();
    println!("Anything else is sent to the assistant as a message.");
}
