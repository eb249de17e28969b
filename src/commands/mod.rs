/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes the handlers for the three subcommands:

- `chat`: interactive conversation loop
- `analyze`: one-shot text/document analysis
- `list_features`: print the available assistant features

These handlers are intentionally small and use the library components:
feature profiles, sessions, and the HTTP transport.
*/

pub mod analyze;
pub mod chat;

use crate::feature::Feature;
use colored::Colorize;

/// Print the available features with their descriptions
pub fn list_features() {
    let features = [
        Feature::Chat,
        Feature::CodeGeneration,
        Feature::Summarization,
        Feature::Ner,
        Feature::Sentiment,
    ];

    println!("{}", "Available features:".bold());
    for feature in features {
        let profile = feature.profile();
        let kind = match profile.mode {
            crate::feature::SessionMode::Transcript => "chat",
            crate::feature::SessionMode::SingleShot => "analyze",
        };
        let inputs = if profile.accepts_documents() {
            "text or document"
        } else {
            "text only"
        };
        println!(
            "  {:<18} {} ({}; {})",
            feature.to_string().cyan(),
            feature.description(),
            kind,
            inputs
        );
    }
}
