//! Conversation and single-shot sessions
//!
//! A session is the per-view orchestration instance: it owns the composer,
//! the dispatcher with its single-flight gate, and (in transcript mode) the
//! transcript. One session exists per active view; nothing is shared across
//! views and nothing is persisted. Dropping a session mid-flight abandons
//! the outstanding request; a late response is simply discarded with it.
//!
//! `submit()` runs the whole machine: guard, optimistic user turn, one
//! outbound call, one resulting assistant turn (result or apology), cleanup.
//! All failures are absorbed before `submit()` returns; nothing escapes to
//! the caller.

use crate::attachment::{AttachmentDescriptor, FileUpload};
use crate::composer::Composer;
use crate::config::ServiceConfig;
use crate::dispatcher::RequestDispatcher;
use crate::error::{CobaError, Result};
use crate::feature::{Feature, FeatureProfile, SessionMode};
use crate::transcript::Transcript;
use crate::transport::{AnalysisTransport, HttpAnalysisClient};

/// What a call to `submit()` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guard rejected the submission (nothing to send, or a request was
    /// already in flight); no turn was appended and no call was made
    Ignored,
    /// One round trip completed and produced one assistant reply
    /// (the analysis result or the feature's apology)
    Replied,
}

/// Transcript-mode session for the chat and code-generation features
///
/// # Examples
///
/// ```no_run
/// use coba::config::ServiceConfig;
/// use coba::feature::Feature;
/// use coba::session::ConversationSession;
///
/// # async fn example() -> coba::error::Result<()> {
/// let config = ServiceConfig::default();
/// let mut session = ConversationSession::over_http(Feature::Chat, &config)?;
/// session.set_input("Summarize the attached notes for me");
/// session.submit().await;
/// println!("{}", session.transcript().last().unwrap().content);
/// # Ok(())
/// # }
/// ```
pub struct ConversationSession {
    profile: FeatureProfile,
    transcript: Transcript,
    composer: Composer,
    dispatcher: RequestDispatcher,
}

impl ConversationSession {
    /// Creates a session for a transcript-mode feature
    ///
    /// The transcript is seeded with the feature's welcome turn.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the feature is a single-shot surface.
    pub fn new(feature: Feature, transport: Box<dyn AnalysisTransport>) -> Result<Self> {
        let profile = feature.profile();
        if profile.mode != SessionMode::Transcript {
            return Err(CobaError::Config(format!(
                "feature '{}' is single-shot, not a conversation",
                feature
            ))
            .into());
        }

        let mut transcript = Transcript::new();
        if let Some(welcome) = profile.welcome {
            transcript.initialize(welcome);
        }

        Ok(Self {
            profile,
            transcript,
            composer: Composer::new(),
            dispatcher: RequestDispatcher::new(transport),
        })
    }

    /// Creates a session backed by the HTTP analysis client
    pub fn over_http(feature: Feature, config: &ServiceConfig) -> Result<Self> {
        let client = HttpAnalysisClient::new(config)?;
        Self::new(feature, Box::new(client))
    }

    /// The feature profile this session was built from
    pub fn profile(&self) -> &FeatureProfile {
        &self.profile
    }

    /// Read-only view of the transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current text input, untrimmed
    pub fn input(&self) -> &str {
        self.composer.input()
    }

    /// Replaces the text input (clears an attached file if non-empty)
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.composer.set_input(value);
    }

    /// True when the file-picking affordance should be offered
    ///
    /// Requires a document-capable feature and an empty (trimmed) text
    /// input.
    pub fn can_attach(&self) -> bool {
        self.profile.accepts_documents() && self.composer.can_attach()
    }

    /// Attaches an upload for the next submission
    ///
    /// # Errors
    ///
    /// Returns `FileTooLarge` for an oversized upload; `Config` when the
    /// feature does not accept documents.
    pub fn attach(&mut self, upload: FileUpload) -> Result<()> {
        if !self.profile.accepts_documents() {
            return Err(CobaError::Config(format!(
                "feature '{}' does not accept documents",
                self.profile.feature
            ))
            .into());
        }
        self.composer.attach(upload)
    }

    /// Removes the attached file
    pub fn remove_upload(&mut self) {
        self.composer.remove_upload();
    }

    /// The attached upload, if any
    pub fn upload(&self) -> Option<&FileUpload> {
        self.composer.upload()
    }

    /// True while a submission is outstanding
    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// True when the submit affordance should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.composer.has_submittable_input()
    }

    /// Submits the pending input as one conversation turn
    ///
    /// Inert (returns `Ignored`) when there is nothing to send or a request
    /// is already in flight. Otherwise appends the optimistic user turn,
    /// performs one round trip, appends exactly one assistant turn, clears
    /// the attachment, and returns to idle on success and failure alike.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.composer.has_submittable_input() || !self.dispatcher.begin() {
            return SubmitOutcome::Ignored;
        }

        let (text, upload) = self.composer.take();
        // Size was validated at attach time, so descriptor derivation
        // cannot fail here.
        let attachments: Vec<AttachmentDescriptor> = upload
            .as_ref()
            .and_then(|u| AttachmentDescriptor::from_upload(u).ok())
            .into_iter()
            .collect();

        self.transcript.append_user(text.clone(), attachments);

        let reply = self
            .dispatcher
            .dispatch(&self.profile, &text, upload.as_ref())
            .await;
        self.transcript.append_assistant(reply);

        self.dispatcher.finish();
        SubmitOutcome::Replied
    }
}

/// Single-shot session for the summarization, sentiment, and NER features
///
/// Runs the same guard/dispatch machine as a conversation but keeps only
/// the latest result string, replaced on every submission, instead of a
/// transcript.
pub struct SingleShotSession {
    profile: FeatureProfile,
    composer: Composer,
    dispatcher: RequestDispatcher,
    result: Option<String>,
}

impl SingleShotSession {
    /// Creates a session for a single-shot feature
    ///
    /// # Errors
    ///
    /// Returns `Config` if the feature is a transcript surface.
    pub fn new(feature: Feature, transport: Box<dyn AnalysisTransport>) -> Result<Self> {
        let profile = feature.profile();
        if profile.mode != SessionMode::SingleShot {
            return Err(CobaError::Config(format!(
                "feature '{}' is a conversation, not single-shot",
                feature
            ))
            .into());
        }

        Ok(Self {
            profile,
            composer: Composer::new(),
            dispatcher: RequestDispatcher::new(transport),
            result: None,
        })
    }

    /// Creates a session backed by the HTTP analysis client
    pub fn over_http(feature: Feature, config: &ServiceConfig) -> Result<Self> {
        let client = HttpAnalysisClient::new(config)?;
        Self::new(feature, Box::new(client))
    }

    /// The feature profile this session was built from
    pub fn profile(&self) -> &FeatureProfile {
        &self.profile
    }

    /// Replaces the text input (clears an attached file if non-empty)
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.composer.set_input(value);
    }

    /// Attaches an upload for the next submission
    ///
    /// # Errors
    ///
    /// Returns `FileTooLarge` for an oversized upload; `Config` when the
    /// feature does not accept documents.
    pub fn attach(&mut self, upload: FileUpload) -> Result<()> {
        if !self.profile.accepts_documents() {
            return Err(CobaError::Config(format!(
                "feature '{}' does not accept documents",
                self.profile.feature
            ))
            .into());
        }
        self.composer.attach(upload)
    }

    /// True while a submission is outstanding
    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// True when the submit affordance should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.composer.has_submittable_input()
    }

    /// The latest result (analysis string or apology), if any
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Discards the current result, returning to the input view
    pub fn reset(&mut self) {
        self.result = None;
        self.composer.remove_upload();
        self.composer.set_input("");
    }

    /// Submits the pending input and stores the result
    ///
    /// Same guard and absorption behavior as the conversation variant; the
    /// outcome replaces any previous result.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.composer.has_submittable_input() || !self.dispatcher.begin() {
            return SubmitOutcome::Ignored;
        }

        let (text, upload) = self.composer.take();
        let reply = self
            .dispatcher
            .dispatch(&self.profile, &text, upload.as_ref())
            .await;
        self.result = Some(reply);

        self.dispatcher.finish();
        SubmitOutcome::Replied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedTransport;
    use crate::transcript::Role;

    fn upload() -> FileUpload {
        FileUpload::new("report.pdf", "application/pdf", vec![0u8; 2 * 1024 * 1024])
    }

    #[test]
    fn test_conversation_is_seeded_with_welcome() {
        let session =
            ConversationSession::new(Feature::Chat, Box::new(ScriptedTransport::default()))
                .unwrap();
        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::Assistant);
        assert!(turns[0].content.contains("C.O.B.A"));
    }

    #[test]
    fn test_conversation_rejects_single_shot_features() {
        let err = ConversationSession::new(
            Feature::Sentiment,
            Box::new(ScriptedTransport::default()),
        )
        .err()
        .unwrap();
        let err = err.downcast::<CobaError>().unwrap();
        assert!(matches!(err, CobaError::Config(_)));
    }

    #[test]
    fn test_single_shot_rejects_transcript_features() {
        let err = SingleShotSession::new(Feature::Chat, Box::new(ScriptedTransport::default()))
            .err()
            .unwrap();
        let err = err.downcast::<CobaError>().unwrap();
        assert!(matches!(err, CobaError::Config(_)));
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_assistant() {
        let transport = ScriptedTransport::default().with_text_reply("Hi there");
        let mut session = ConversationSession::new(Feature::Chat, Box::new(transport)).unwrap();

        session.set_input("Hello");
        assert_eq!(session.submit().await, SubmitOutcome::Replied);

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].role, Role::User);
        assert_eq!(turns[1].content, "Hello");
        assert_eq!(turns[2].role, Role::Assistant);
        assert_eq!(turns[2].content, "Hi there");
        assert!(!session.is_busy());
        assert_eq!(session.input(), "");
    }

    #[tokio::test]
    async fn test_submit_sends_raw_untrimmed_input() {
        let transport = ScriptedTransport::default();
        let calls = transport.calls_handle();
        let mut session = ConversationSession::new(Feature::Chat, Box::new(transport)).unwrap();

        // The guard checks trimmed text, the payload carries the raw value.
        session.set_input("  Hello \n");
        assert_eq!(session.submit().await, SubmitOutcome::Replied);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/api/analyze-text");
        assert_eq!(calls[0].payload, "  Hello \n");
    }

    #[tokio::test]
    async fn test_empty_submit_is_inert() {
        let transport = ScriptedTransport::default();
        let calls = transport.calls_handle();
        let mut session = ConversationSession::new(Feature::Chat, Box::new(transport)).unwrap();

        assert_eq!(session.submit().await, SubmitOutcome::Ignored);
        session.set_input("   ");
        assert_eq!(session.submit().await, SubmitOutcome::Ignored);

        assert_eq!(session.transcript().len(), 1);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transcript_shape_after_n_submissions() {
        let transport = ScriptedTransport::default().with_text_reply("ok");
        let mut session = ConversationSession::new(Feature::Chat, Box::new(transport)).unwrap();

        let n = 4;
        for i in 0..n {
            session.set_input(format!("message {}", i));
            assert_eq!(session.submit().await, SubmitOutcome::Replied);
        }

        // 1 welcome + 2N turns, alternating user/assistant, ending assistant.
        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 1 + 2 * n);
        for (i, turn) in turns.iter().enumerate().skip(1) {
            let expected = if i % 2 == 1 { Role::User } else { Role::Assistant };
            assert_eq!(turn.role, expected, "turn {}", i);
        }
        assert_eq!(turns.last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_document_submission_carries_descriptor() {
        let transport = ScriptedTransport::default().with_document_reply("Summarized!");
        let calls = transport.calls_handle();
        let mut session = ConversationSession::new(Feature::Chat, Box::new(transport)).unwrap();

        session.attach(upload()).unwrap();
        assert_eq!(session.submit().await, SubmitOutcome::Replied);

        let turns = session.transcript().turns();
        let user_turn = &turns[1];
        assert_eq!(user_turn.content, "");
        assert_eq!(user_turn.attachments.len(), 1);
        assert_eq!(user_turn.attachments[0].name, "report.pdf");
        assert_eq!(user_turn.attachments[0].size_label, "2.0 MB");
        assert_eq!(turns[2].content, "Summarized!");

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].path, "/api/analyze-document");
        assert_eq!(calls[0].payload, "report.pdf");
    }

    #[tokio::test]
    async fn test_failed_submission_appends_apology_and_clears_attachment() {
        let transport = ScriptedTransport::default().failing();
        let mut session = ConversationSession::new(Feature::Chat, Box::new(transport)).unwrap();

        session.attach(upload()).unwrap();
        assert_eq!(session.submit().await, SubmitOutcome::Replied);

        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(
            last.content,
            "Sorry, I couldn't analyze that document. Please try again."
        );
        assert!(!session.is_busy());
        assert!(session.upload().is_none());
        // Gate is reset: the next submission is admitted again.
        session.set_input("hello again");
        assert!(session.can_submit());
    }

    #[tokio::test]
    async fn test_attach_rejected_for_text_only_feature() {
        let mut session = ConversationSession::new(
            Feature::CodeGeneration,
            Box::new(ScriptedTransport::default()),
        )
        .unwrap();
        assert!(!session.can_attach());
        let err = session.attach(upload()).unwrap_err();
        let err = err.downcast::<CobaError>().unwrap();
        assert!(matches!(err, CobaError::Config(_)));
    }

    #[tokio::test]
    async fn test_single_shot_stores_and_replaces_result() {
        let transport = ScriptedTransport::default().with_text_reply("positive");
        let mut session = SingleShotSession::new(Feature::Sentiment, Box::new(transport)).unwrap();
        assert!(session.result().is_none());

        session.set_input("I love this product");
        assert_eq!(session.submit().await, SubmitOutcome::Replied);
        assert_eq!(session.result(), Some("positive"));

        session.set_input("I hate this product");
        assert_eq!(session.submit().await, SubmitOutcome::Replied);
        // The previous result is replaced, not accumulated.
        assert_eq!(session.result(), Some("positive"));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_single_shot_failure_stores_apology() {
        let transport = ScriptedTransport::default().failing();
        let mut session = SingleShotSession::new(Feature::Sentiment, Box::new(transport)).unwrap();

        session.set_input("some text");
        assert_eq!(session.submit().await, SubmitOutcome::Replied);
        assert_eq!(
            session.result(),
            Some("Sorry, something went wrong while analyzing the text. Please try again.")
        );
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_single_shot_reset() {
        let transport = ScriptedTransport::default().with_text_reply("a summary");
        let mut session =
            SingleShotSession::new(Feature::Summarization, Box::new(transport)).unwrap();

        session.set_input("long text");
        session.submit().await;
        assert!(session.result().is_some());

        session.reset();
        assert!(session.result().is_none());
        assert!(!session.can_submit());
    }

    #[tokio::test]
    async fn test_single_shot_document_submission() {
        let transport = ScriptedTransport::default().with_document_reply("doc summary");
        let calls = transport.calls_handle();
        let mut session =
            SingleShotSession::new(Feature::Summarization, Box::new(transport)).unwrap();

        session.attach(upload()).unwrap();
        assert_eq!(session.submit().await, SubmitOutcome::Replied);
        assert_eq!(session.result(), Some("doc summary"));
        assert_eq!(calls.lock().unwrap()[0].path, "/api/analyze-document");
    }
}
