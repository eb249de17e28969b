//! Command-line interface definition for COBA
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat and one-shot analysis.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// COBA - Conversation client for the C.O.B.A text analysis service
///
/// Chat with the assistant or run one-shot text/document analysis
/// (summarization, sentiment, named-entity recognition).
#[derive(Parser, Debug, Clone)]
#[command(name = "coba")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the analysis service base URL from config
    #[arg(long, env = "COBA_BASE_URL")]
    pub base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for COBA
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive conversation with the assistant
    Chat {
        /// Conversation feature: chat (text + documents) or code-generation
        /// (text only)
        #[arg(short, long)]
        feature: Option<String>,
    },

    /// Run a one-shot analysis and print the result
    Analyze {
        /// Analysis feature: summarization, sentiment, or ner
        #[arg(short, long)]
        feature: String,

        /// Text to analyze (alternative to --file)
        text: Option<String>,

        /// Document to analyze (pdf, doc, docx, or txt; max 10 MiB)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List the available assistant features
    Features,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            base_url: None,
            command: Commands::Chat { feature: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(cli.base_url.is_none());

        if let Commands::Chat { feature } = cli.command {
            assert!(feature.is_none());
        } else {
            panic!("Expected default command to be Chat");
        }
    }

    #[test]
    fn test_parse_chat_with_feature() {
        let cli = Cli::parse_from(["coba", "chat", "--feature", "code-generation"]);
        match cli.command {
            Commands::Chat { feature } => {
                assert_eq!(feature, Some("code-generation".to_string()));
            }
            other => panic!("Expected Chat command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_analyze_with_text() {
        let cli = Cli::parse_from(["coba", "analyze", "--feature", "sentiment", "great product"]);
        match cli.command {
            Commands::Analyze {
                feature,
                text,
                file,
            } => {
                assert_eq!(feature, "sentiment");
                assert_eq!(text, Some("great product".to_string()));
                assert!(file.is_none());
            }
            other => panic!("Expected Analyze command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_analyze_with_file() {
        let cli = Cli::parse_from([
            "coba",
            "analyze",
            "--feature",
            "summarization",
            "--file",
            "report.pdf",
        ]);
        match cli.command {
            Commands::Analyze { file, .. } => {
                assert_eq!(file, Some(PathBuf::from("report.pdf")));
            }
            other => panic!("Expected Analyze command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_base_url_override() {
        let cli = Cli::parse_from(["coba", "--base-url", "http://localhost:9999", "features"]);
        assert_eq!(cli.base_url, Some("http://localhost:9999".to_string()));
        assert!(matches!(cli.command, Commands::Features));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
