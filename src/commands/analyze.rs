//! One-shot analysis command handler
//!
//! Runs a single-shot session (summarization, sentiment, or NER) for one
//! text or document input and prints the result to stdout.

use crate::attachment::{FileUpload, ACCEPTED_EXTENSIONS};
use crate::config::Config;
use crate::error::{CobaError, Result};
use crate::feature::Feature;
use crate::session::{SingleShotSession, SubmitOutcome};

use colored::Colorize;
use std::path::PathBuf;

/// Run a one-shot analysis and print the result
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `feature_name` - Which single-shot feature to run
/// * `text` - Text input, mutually exclusive with `file`
/// * `file` - Document input (pdf, doc, docx, or txt; max 10 MiB)
///
/// # Errors
///
/// Returns error for an unknown or transcript-mode feature, conflicting or
/// missing inputs, or an unreadable/oversized file. Service failures do not
/// error; they print the feature's apology string like the web front-end.
pub async fn run_analyze(
    config: Config,
    feature_name: &str,
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let feature = Feature::parse_str(feature_name).map_err(CobaError::Config)?;

    let mut session = SingleShotSession::over_http(feature, &config.service)?;

    match (text, file) {
        (Some(_), Some(_)) => {
            // Mirrors the UI: the file picker is disabled while text is
            // present, so the two inputs never combine.
            return Err(CobaError::Config(
                "provide either text or --file, not both".to_string(),
            )
            .into());
        }
        (Some(text), None) => {
            session.set_input(text);
        }
        (None, Some(path)) => {
            let upload = FileUpload::from_path(&path)?;
            if !upload.has_accepted_extension() {
                eprintln!(
                    "{}",
                    format!(
                        "Note: expected one of {}; the service may reject this file",
                        ACCEPTED_EXTENSIONS.join(", ")
                    )
                    .yellow()
                );
            }
            session.attach(upload)?;
        }
        (None, None) => {
            return Err(
                CobaError::Config("provide text to analyze or --file <path>".to_string()).into(),
            );
        }
    }

    if session.submit().await != SubmitOutcome::Replied {
        return Err(CobaError::Config("nothing to analyze".to_string()).into());
    }

    if let Some(result) = session.result() {
        println!("{}", result);
    }
    Ok(())
}
