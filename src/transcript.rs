//! Conversation transcript management
//!
//! This module implements the append-only conversation transcript: an
//! ordered history of user and assistant turns, seeded with a synthetic
//! welcome turn. Turns are immutable once appended; the transcript only
//! ever grows, so insertion order, chronological order, and display order
//! are always the same sequence.

use crate::attachment::AttachmentDescriptor;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a turn, unique within its transcript
///
/// Ids are assigned by the transcript at append time from a monotonic
/// sequence, so comparing two ids orders the turns by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(u64);

impl TurnId {
    /// Returns the raw sequence value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of the turn author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A turn authored by the user
    User,
    /// A turn returned by the assistant (or synthesized locally, e.g. the
    /// welcome turn and apology turns)
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in a conversation
///
/// A user turn carries the text the user submitted (possibly empty when a
/// document was attached instead) and the display descriptors of any
/// attachments. An assistant turn carries the analysis result string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Identifier assigned at append time
    pub id: TurnId,
    /// Author of the turn
    pub role: Role,
    /// Text body; empty for a user turn that submitted only a document
    pub content: String,
    /// Display descriptors for attached files (zero or one in practice,
    /// kept as a sequence for extensibility)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<AttachmentDescriptor>,
}

/// Append-only ordered history of turns for one conversation session
///
/// The transcript exclusively owns its turns. It lives for the duration of
/// one session and is discarded with it; there is no persistence.
///
/// # Examples
///
/// ```
/// use coba::transcript::{Role, Transcript};
///
/// let mut transcript = Transcript::new();
/// transcript.initialize("Hello! Paste text to get started.");
/// transcript.append_user("Summarize this", Vec::new());
/// transcript.append_assistant("A summary.");
///
/// let turns = transcript.turns();
/// assert_eq!(turns.len(), 3);
/// assert_eq!(turns[0].role, Role::Assistant);
/// assert_eq!(turns[2].content, "A summary.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    next_id: u64,
}

impl Transcript {
    /// Creates an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the transcript with one synthetic assistant welcome turn
    ///
    /// Idempotent: calling this on a non-empty transcript is a no-op, so a
    /// view can safely re-run its initialization path.
    pub fn initialize(&mut self, welcome: &str) {
        if self.turns.is_empty() {
            self.append(Role::Assistant, welcome.to_string(), Vec::new());
        }
    }

    /// Appends a user turn built from submitted text and attachments
    ///
    /// Returns the id assigned to the new turn. Never fails.
    pub fn append_user(
        &mut self,
        content: impl Into<String>,
        attachments: Vec<AttachmentDescriptor>,
    ) -> TurnId {
        self.append(Role::User, content.into(), attachments)
    }

    /// Appends an assistant turn with the given result text
    ///
    /// Assistant turns are appended whole when a response arrives; there is
    /// no token-by-token mutation.
    pub fn append_assistant(&mut self, content: impl Into<String>) -> TurnId {
        self.append(Role::Assistant, content.into(), Vec::new())
    }

    fn append(&mut self, role: Role, content: String, attachments: Vec<AttachmentDescriptor>) -> TurnId {
        let id = TurnId(self.next_id);
        self.next_id += 1;
        self.turns.push(Turn {
            id,
            role,
            content,
            attachments,
        });
        id
    }

    /// Returns the ordered sequence of turns for rendering
    ///
    /// Consumers must treat the slice as read-only; turns are immutable
    /// once appended.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the most recently appended turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Returns the number of turns in the transcript
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turn has been appended yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert!(transcript.last().is_none());
    }

    #[test]
    fn test_initialize_seeds_welcome_turn() {
        let mut transcript = Transcript::new();
        transcript.initialize("Welcome!");

        assert_eq!(transcript.len(), 1);
        let turn = transcript.last().unwrap();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "Welcome!");
        assert!(turn.attachments.is_empty());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.initialize("Welcome!");
        transcript.initialize("Welcome!");
        transcript.initialize("A different welcome");

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().unwrap().content, "Welcome!");
    }

    #[test]
    fn test_initialize_noop_after_append() {
        let mut transcript = Transcript::new();
        transcript.append_user("hi", Vec::new());
        transcript.initialize("Welcome!");

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().unwrap().role, Role::User);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.initialize("Welcome!");
        transcript.append_user("first", Vec::new());
        transcript.append_assistant("second");
        transcript.append_user("third", Vec::new());

        let contents: Vec<&str> = transcript
            .turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["Welcome!", "first", "second", "third"]);
    }

    #[test]
    fn test_turn_ids_are_monotonic() {
        let mut transcript = Transcript::new();
        let a = transcript.append_user("a", Vec::new());
        let b = transcript.append_assistant("b");
        let c = transcript.append_user("c", Vec::new());

        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.value(), 0);
        assert_eq!(c.value(), 2);
    }

    #[test]
    fn test_user_turn_may_have_empty_content() {
        // A document-only submission appends a user turn with no text
        let mut transcript = Transcript::new();
        transcript.append_user("", Vec::new());
        assert_eq!(transcript.last().unwrap().content, "");
    }

    #[test]
    fn test_role_serialization_is_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, "\"user\"");
    }
}
