//! HTTP client for the Plant.id identification endpoint.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zfarming_core::identification::{
    IdentificationProvider, IdentificationSuggestion, UpstreamError,
};

use crate::config::PlantIdConfig;
use crate::response::{IdentifyRequest, IdentifyResponse};

/// Errors from the Plant.id REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum PlantIdError {
    /// No API key configured.
    #[error("Plant.id API key not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Plant.id returned a non-2xx status code.
    #[error("Plant.id API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid Plant.id response: {0}")]
    Decode(String),
}

impl From<PlantIdError> for UpstreamError {
    fn from(err: PlantIdError) -> Self {
        match err {
            PlantIdError::NotConfigured => UpstreamError::NotConfigured,
            PlantIdError::Request(e) => UpstreamError::Request(e.to_string()),
            PlantIdError::ApiError { status, body } => UpstreamError::Status { status, body },
            PlantIdError::Decode(msg) => UpstreamError::InvalidResponse(msg),
        }
    }
}

/// Client for a single Plant.id endpoint.
///
/// Each identification is one request bounded by the configured timeout;
/// there are no retries.
pub struct PlantIdClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl PlantIdClient {
    /// Build a client with the configured timeout.
    pub fn new(config: &PlantIdConfig) -> Result<Self, PlantIdError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Submit one image and return the provider's ranked suggestions.
    pub async fn identify(
        &self,
        image: &[u8],
    ) -> Result<Vec<IdentificationSuggestion>, PlantIdError> {
        let api_key = self.api_key.as_deref().ok_or(PlantIdError::NotConfigured)?;
        let body = IdentifyRequest::new(BASE64.encode(image));

        let response = self
            .client
            .post(&self.api_url)
            .header("Api-Key", api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        let parsed: IdentifyResponse =
            serde_json::from_str(&text).map_err(|e| PlantIdError::Decode(e.to_string()))?;

        let suggestions = parsed.into_suggestions();
        tracing::debug!(count = suggestions.len(), "Plant.id returned suggestions");
        Ok(suggestions)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`PlantIdError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PlantIdError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PlantIdError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl IdentificationProvider for PlantIdClient {
    async fn fetch_suggestions(
        &self,
        image: &[u8],
    ) -> Result<Vec<IdentificationSuggestion>, UpstreamError> {
        self.identify(image).await.map_err(UpstreamError::from)
    }
}
