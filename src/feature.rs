//! Feature profiles for the C.O.B.A assistant surfaces
//!
//! The product exposes five front-end features (document/Q&A chat,
//! summarization, sentiment analysis, named-entity recognition, and code
//! generation). Each one is a parameterization of the same orchestration
//! machine: an endpoint per input kind, the response field that endpoint is
//! contracted to return, a session mode, and the fixed welcome/apology
//! strings. This module centralizes those parameters so no feature needs
//! its own dispatch logic.

use std::fmt;

/// Which field a successful response body carries the result in
///
/// The field name is endpoint-specific and part of that endpoint's
/// contract; it is never guessed generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
    /// `summary` (summarization-style endpoints)
    Summary,
    /// `analysis` (sentiment/generic analysis endpoints)
    Analysis,
}

impl ResponseField {
    /// JSON key of the field in the response body
    pub fn key(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Analysis => "analysis",
        }
    }
}

impl fmt::Display for ResponseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One endpoint of the analysis service, with its response contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    /// Path relative to the service base URL
    pub path: &'static str,
    /// Field a 2xx response is expected to carry the result in
    pub response_field: ResponseField,
}

/// Session shape used by a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Ordered transcript of request/response turns with a welcome turn
    Transcript,
    /// One result at a time, replaced per submission, no transcript
    SingleShot,
}

/// Product feature selecting one assistant surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Document/Q&A chatbot (text or document, transcript)
    Chat,
    /// Code generation assistant (text only, transcript)
    CodeGeneration,
    /// Text/document summarization (single-shot)
    Summarization,
    /// Named-entity recognition (single-shot)
    Ner,
    /// Sentiment analysis (single-shot)
    Sentiment,
}

impl Feature {
    /// Parse a feature from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use coba::feature::Feature;
    ///
    /// let feature = Feature::parse_str("sentiment").unwrap();
    /// assert_eq!(feature, Feature::Sentiment);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "chat" | "chatbot" => Ok(Self::Chat),
            "code-generation" | "codegen" | "code" => Ok(Self::CodeGeneration),
            "summarization" | "summary" => Ok(Self::Summarization),
            "ner" | "name-entity-recognition" => Ok(Self::Ner),
            "sentiment" | "sentimental-analysis" => Ok(Self::Sentiment),
            other => Err(format!("Unknown feature: {}", other)),
        }
    }

    /// The orchestration profile for this feature
    pub fn profile(&self) -> FeatureProfile {
        match self {
            Self::Chat => FeatureProfile {
                feature: *self,
                mode: SessionMode::Transcript,
                text: EndpointSpec {
                    path: "/api/analyze-text",
                    response_field: ResponseField::Summary,
                },
                document: Some(EndpointSpec {
                    path: "/api/analyze-document",
                    response_field: ResponseField::Summary,
                }),
                welcome: Some(
                    "\u{1F44B} Hello! I'm C.O.B.A Upload a document OR paste text to get started.",
                ),
                text_apology: "Sorry, I couldn't analyze that text. Please try again.",
                document_apology: Some(
                    "Sorry, I couldn't analyze that document. Please try again.",
                ),
            },
            Self::CodeGeneration => FeatureProfile {
                feature: *self,
                mode: SessionMode::Transcript,
                text: EndpointSpec {
                    path: "/api/analyze-text",
                    response_field: ResponseField::Analysis,
                },
                document: None,
                welcome: Some(
                    "\u{1F44B} Hello! I'm your text analysis assistant. Paste or type text to analyze.",
                ),
                text_apology: "Sorry, I couldn't analyze that text. Please try again.",
                document_apology: None,
            },
            Self::Summarization => FeatureProfile {
                feature: *self,
                mode: SessionMode::SingleShot,
                text: EndpointSpec {
                    path: "/api/analyze-text",
                    response_field: ResponseField::Summary,
                },
                document: Some(EndpointSpec {
                    path: "/api/analyze-document",
                    response_field: ResponseField::Summary,
                }),
                welcome: None,
                text_apology:
                    "Sorry, something went wrong while generating the summary. Please try again.",
                document_apology: Some(
                    "Sorry, something went wrong while generating the summary. Please try again.",
                ),
            },
            Self::Ner => FeatureProfile {
                feature: *self,
                mode: SessionMode::SingleShot,
                text: EndpointSpec {
                    path: "/api/analyze-text",
                    response_field: ResponseField::Summary,
                },
                document: None,
                welcome: None,
                text_apology:
                    "Sorry, something went wrong while generating the summary. Please try again.",
                document_apology: None,
            },
            Self::Sentiment => FeatureProfile {
                feature: *self,
                mode: SessionMode::SingleShot,
                text: EndpointSpec {
                    path: "/api/analyze-sentiment",
                    response_field: ResponseField::Analysis,
                },
                document: None,
                welcome: None,
                text_apology:
                    "Sorry, something went wrong while analyzing the text. Please try again.",
                document_apology: None,
            },
        }
    }

    /// User-friendly description of the feature
    pub fn description(&self) -> &'static str {
        match self {
            Self::Chat => "Document and text Q&A chatbot",
            Self::CodeGeneration => "Code generation assistant",
            Self::Summarization => "Text and document summarization",
            Self::Ner => "Named-entity recognition",
            Self::Sentiment => "Sentiment analysis",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat => write!(f, "chat"),
            Self::CodeGeneration => write!(f, "code-generation"),
            Self::Summarization => write!(f, "summarization"),
            Self::Ner => write!(f, "ner"),
            Self::Sentiment => write!(f, "sentiment"),
        }
    }
}

/// Orchestration parameters for one feature
///
/// Everything feature-specific the dispatcher and sessions need: endpoints
/// and their response contracts, the session mode, and the fixed strings
/// shown to the user.
#[derive(Debug, Clone, Copy)]
pub struct FeatureProfile {
    /// Feature this profile belongs to
    pub feature: Feature,
    /// Transcript or single-shot session shape
    pub mode: SessionMode,
    /// Endpoint used for text submissions
    pub text: EndpointSpec,
    /// Endpoint used for document submissions; `None` for text-only features
    pub document: Option<EndpointSpec>,
    /// Welcome turn content for transcript sessions
    pub welcome: Option<&'static str>,
    /// Apology shown when a text submission fails
    pub text_apology: &'static str,
    /// Apology shown when a document submission fails
    pub document_apology: Option<&'static str>,
}

impl FeatureProfile {
    /// True if the feature accepts document uploads
    pub fn accepts_documents(&self) -> bool {
        self.document.is_some()
    }
}
