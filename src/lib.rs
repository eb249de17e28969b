//! COBA - Conversation client library for the C.O.B.A text analysis service
//!
//! This library implements the conversation orchestration model behind the
//! C.O.B.A assistant's surfaces (chat, summarization, sentiment analysis,
//! named-entity recognition, code generation): transcript management,
//! text/file input exclusivity, and single-flight request dispatch to the
//! analysis endpoints. The service itself is an external collaborator; this
//! crate only orchestrates requests and renders the strings it returns.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `transcript`: Append-only conversation history of user/assistant turns
//! - `composer`: Text/file input mode selection and exclusivity
//! - `attachment`: Upload validation and display-safe descriptors
//! - `feature`: Per-feature endpoint and string profiles
//! - `transport`: HTTP transport trait and reqwest implementation
//! - `dispatcher`: Single-flight request dispatch with failure absorption
//! - `session`: Conversation and single-shot session orchestration
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use coba::config::ServiceConfig;
//! use coba::feature::Feature;
//! use coba::session::ConversationSession;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::default();
//!     let mut session = ConversationSession::over_http(Feature::Chat, &config)?;
//!
//!     session.set_input("Summarize this paragraph for me: ...");
//!     session.submit().await;
//!
//!     for turn in session.transcript().turns() {
//!         println!("{}: {}", turn.role, turn.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod attachment;
pub mod cli;
pub mod commands;
pub mod composer;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod feature;
pub mod session;
pub mod transcript;
pub mod transport;

// Re-export commonly used types
pub use attachment::{AttachmentDescriptor, FileUpload};
pub use composer::{Composer, InputMode};
pub use config::Config;
pub use dispatcher::{DispatchState, RequestDispatcher};
pub use error::{CobaError, Result};
pub use feature::{Feature, FeatureProfile, SessionMode};
pub use session::{ConversationSession, SingleShotSession, SubmitOutcome};
pub use transcript::{Role, Transcript, Turn, TurnId};
pub use transport::{AnalysisTransport, HttpAnalysisClient};

#[cfg(test)]
pub mod test_utils;
