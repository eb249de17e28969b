//! Shared test helpers
//!
//! A scripted in-process transport so session and dispatcher tests can run
//! without a server, plus call recording for asserting what was sent.

use crate::attachment::FileUpload;
use crate::error::{CobaError, Result};
use crate::feature::EndpointSpec;
use crate::transport::AnalysisTransport;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One call observed by a `ScriptedTransport`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Endpoint path the call targeted
    pub path: String,
    /// The raw text payload, or the uploaded file name for documents
    pub payload: String,
}

/// Scripted stand-in for the HTTP transport
///
/// Replies with fixed strings (or a transport error when `failing()`), and
/// records every call so tests can assert routing and payloads.
#[derive(Default)]
pub struct ScriptedTransport {
    text_reply: Option<String>,
    document_reply: Option<String>,
    fail: bool,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedTransport {
    /// Sets the reply returned for text submissions
    pub fn with_text_reply(mut self, reply: impl Into<String>) -> Self {
        self.text_reply = Some(reply.into());
        self
    }

    /// Sets the reply returned for document submissions
    pub fn with_document_reply(mut self, reply: impl Into<String>) -> Self {
        self.document_reply = Some(reply.into());
        self
    }

    /// Makes every call fail with a transport error
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Handle to the recorded calls, usable after the transport is boxed
    pub fn calls_handle(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl AnalysisTransport for ScriptedTransport {
    async fn analyze_text(&self, endpoint: &EndpointSpec, text: &str) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: endpoint.path.to_string(),
            payload: text.to_string(),
        });
        if self.fail {
            return Err(CobaError::Transport("scripted failure".to_string()).into());
        }
        Ok(self
            .text_reply
            .clone()
            .unwrap_or_else(|| "scripted text reply".to_string()))
    }

    async fn analyze_document(
        &self,
        endpoint: &EndpointSpec,
        upload: &FileUpload,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: endpoint.path.to_string(),
            payload: upload.name.clone(),
        });
        if self.fail {
            return Err(CobaError::Transport("scripted failure".to_string()).into());
        }
        Ok(self
            .document_reply
            .clone()
            .unwrap_or_else(|| "scripted document reply".to_string()))
    }
}
