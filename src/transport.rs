//! HTTP transport to the analysis service
//!
//! This module defines the `AnalysisTransport` trait that the dispatcher
//! calls through, plus the production `HttpAnalysisClient` built on
//! `reqwest`. Text submissions go out as JSON `{"text": ...}`, document
//! submissions as multipart form data with the raw file under the fixed
//! field name `file`. Each endpoint's response contract names the one
//! string field the result is read from.

use crate::attachment::FileUpload;
use crate::config::ServiceConfig;
use crate::error::{CobaError, Result};
use crate::feature::EndpointSpec;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Outbound request body for text analysis endpoints
///
/// Carries the raw, untrimmed input value exactly as submitted.
#[derive(Debug, Serialize)]
struct AnalyzeTextRequest<'a> {
    text: &'a str,
}

/// Transport seam between the dispatcher and the analysis service
///
/// The production implementation speaks HTTP; tests drive sessions with a
/// scripted fake. Implementations perform exactly one round trip per call
/// and never retry.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Posts a text payload and returns the endpoint's result string
    async fn analyze_text(&self, endpoint: &EndpointSpec, text: &str) -> Result<String>;

    /// Posts a document as multipart form data and returns the result string
    async fn analyze_document(&self, endpoint: &EndpointSpec, upload: &FileUpload)
        -> Result<String>;
}

/// HTTP client for the C.O.B.A analysis service
///
/// # Examples
///
/// ```no_run
/// use coba::config::ServiceConfig;
/// use coba::feature::Feature;
/// use coba::transport::{AnalysisTransport, HttpAnalysisClient};
///
/// # async fn example() -> coba::error::Result<()> {
/// let config = ServiceConfig {
///     base_url: "http://localhost:3000".to_string(),
///     ..Default::default()
/// };
/// let client = HttpAnalysisClient::new(&config)?;
/// let profile = Feature::Sentiment.profile();
/// let analysis = client.analyze_text(&profile.text, "I love this").await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Create a new client for the configured service
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(format!("coba/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CobaError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized analysis client: base_url={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, endpoint: &EndpointSpec) -> String {
        format!("{}{}", self.base_url, endpoint.path)
    }

    /// Pulls the contracted result field out of a 2xx response body
    ///
    /// A body that is not JSON or lacks the expected string field is a
    /// `MalformedResponse`; the field name is part of the endpoint's
    /// contract, never guessed.
    fn extract_result(endpoint: &EndpointSpec, body: serde_json::Value) -> Result<String> {
        let field = endpoint.response_field.key();
        match body.get(field).and_then(|v| v.as_str()) {
            Some(result) => Ok(result.to_string()),
            None => {
                tracing::warn!(
                    "response from {} is missing expected field '{}'",
                    endpoint.path,
                    field
                );
                Err(CobaError::MalformedResponse {
                    endpoint: endpoint.path.to_string(),
                    field: field.to_string(),
                }
                .into())
            }
        }
    }

    async fn decode_response(
        endpoint: &EndpointSpec,
        response: reqwest::Response,
    ) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                "analysis service returned {} for {}: {}",
                status,
                endpoint.path,
                error_text
            );
            return Err(CobaError::Transport(format!(
                "analysis service returned {} for {}",
                status, endpoint.path
            ))
            .into());
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::warn!("failed to parse response from {}: {}", endpoint.path, e);
            CobaError::MalformedResponse {
                endpoint: endpoint.path.to_string(),
                field: endpoint.response_field.key().to_string(),
            }
        })?;

        Self::extract_result(endpoint, body)
    }
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisClient {
    async fn analyze_text(&self, endpoint: &EndpointSpec, text: &str) -> Result<String> {
        let url = self.url_for(endpoint);
        tracing::debug!("POST {} ({} chars of text)", url, text.len());

        let response = self
            .client
            .post(&url)
            .json(&AnalyzeTextRequest { text })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("request to {} failed: {}", url, e);
                CobaError::Transport(format!("request to {} failed: {}", endpoint.path, e))
            })?;

        Self::decode_response(endpoint, response).await
    }

    async fn analyze_document(
        &self,
        endpoint: &EndpointSpec,
        upload: &FileUpload,
    ) -> Result<String> {
        let url = self.url_for(endpoint);
        tracing::debug!(
            "POST {} (document '{}', {} bytes)",
            url,
            upload.name,
            upload.size()
        );

        // The raw file goes under the fixed field name "file"; the bytes
        // are cloned into the one request that carries them.
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| CobaError::Transport(format!("invalid mime type: {}", e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("request to {} failed: {}", url, e);
                CobaError::Transport(format!("request to {} failed: {}", endpoint.path, e))
            })?;

        Self::decode_response(endpoint, response).await
    }
}
