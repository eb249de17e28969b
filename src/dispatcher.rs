//! Request dispatch and the single-flight gate
//!
//! The dispatcher turns one submission into exactly one outbound call and
//! exactly one result string. All failures (connection errors, non-2xx
//! statuses, malformed bodies) are absorbed here: the caller always gets a
//! string back, either the endpoint's result or the feature's fixed
//! user-safe apology. Raw errors go to the log, never to the user.
//!
//! The dispatch state is a two-state machine, `Idle -> Submitting -> Idle`,
//! with the same path taken on success and on failure. The gate admits at
//! most one in-flight submission, so responses can never be reordered
//! relative to their requests.

use crate::attachment::FileUpload;
use crate::feature::FeatureProfile;
use crate::transport::AnalysisTransport;

/// Dispatch state for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// No request outstanding; submissions are admitted
    Idle,
    /// One request in flight; further submissions are inert
    Submitting,
}

impl std::fmt::Display for DispatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
        }
    }
}

/// Maps submissions to outbound calls, single-flight
///
/// Owned exclusively by one session; holds only a transient, non-owning
/// reference to the in-flight payload for the duration of one call.
pub struct RequestDispatcher {
    transport: Box<dyn AnalysisTransport>,
    state: DispatchState,
}

impl RequestDispatcher {
    /// Creates an idle dispatcher over the given transport
    pub fn new(transport: Box<dyn AnalysisTransport>) -> Self {
        Self {
            transport,
            state: DispatchState::Idle,
        }
    }

    /// Current dispatch state
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// True while a submission is outstanding
    pub fn is_busy(&self) -> bool {
        self.state == DispatchState::Submitting
    }

    /// Attempts the `Idle -> Submitting` transition
    ///
    /// Returns false when a request is already outstanding; the attempted
    /// submission is then inert (no turn appended, no call made), which is
    /// the contract rather than an error.
    pub fn begin(&mut self) -> bool {
        match self.state {
            DispatchState::Idle => {
                self.state = DispatchState::Submitting;
                true
            }
            DispatchState::Submitting => {
                tracing::debug!("submission ignored: request already in flight");
                false
            }
        }
    }

    /// Returns to `Idle`, regardless of how the round trip ended
    pub fn finish(&mut self) {
        self.state = DispatchState::Idle;
    }

    /// Issues exactly one outbound call and collapses the outcome to a string
    ///
    /// An attached upload selects the feature's document endpoint and a
    /// multipart payload; otherwise the raw text goes to the text endpoint
    /// as JSON. On any failure the feature's apology string for that input
    /// kind is returned and the underlying error is logged.
    ///
    /// Must be called between `begin()` and `finish()`.
    pub async fn dispatch(
        &self,
        profile: &FeatureProfile,
        text: &str,
        upload: Option<&FileUpload>,
    ) -> String {
        debug_assert_eq!(self.state, DispatchState::Submitting);

        match upload {
            Some(upload) => {
                let Some(endpoint) = profile.document else {
                    // Profiles without a document endpoint never offer the
                    // attach affordance; reaching this is a wiring bug.
                    tracing::error!(
                        "feature {} received a document submission without a document endpoint",
                        profile.feature
                    );
                    return profile.text_apology.to_string();
                };
                match self.transport.analyze_document(&endpoint, upload).await {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::error!("document analysis failed: {:#}", e);
                        profile
                            .document_apology
                            .unwrap_or(profile.text_apology)
                            .to_string()
                    }
                }
            }
            None => match self.transport.analyze_text(&profile.text, text).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("text analysis failed: {:#}", e);
                    profile.text_apology.to_string()
                }
            },
        }
    }
}
