use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error};

use super::endpoints::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::config::{ApiKeySource, CredentialHint, DEFAULT_API_BASE};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found (looked in {0})")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API error {status}: {error_body}")]
    Api {
        status: StatusCode,
        error_body: String,
        credential: CredentialHint,
    },

    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

impl ApiConnectionError {
    /// The provider's own error message when the body is the usual JSON envelope,
    /// otherwise the raw text of the error.
    pub fn provider_message(&self) -> String {
        match self {
            ApiConnectionError::Api { error_body, .. } => {
                serde_json::from_str::<ApiErrorEnvelope>(error_body)
                    .map(|envelope| envelope.error.message)
                    .ok()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| error_body.clone())
            }
            other => other.to_string(),
        }
    }
}

/// Thin client for the `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct Provider {
    api_key: ApiKeySource,
    base_url: String,
    client: Client,
}

impl Provider {
    pub fn gemini(api_key: ApiKeySource) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    pub fn with_base_url(api_key: ApiKeySource, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn api_key_source(&self) -> &ApiKeySource {
        &self.api_key
    }

    /// Looks the key up again; callers use this to fail fast before building a request.
    pub fn resolve_api_key(&self) -> Result<String, ApiConnectionError> {
        self.api_key
            .resolve()
            .ok_or_else(|| ApiConnectionError::MissingApiKey(self.api_key.describe()))
    }

    pub fn endpoint_url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    pub async fn call_generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiConnectionError> {
        let api_key = self.resolve_api_key()?;
        let key_prefix: String = api_key.chars().take(4).collect();
        debug!(model, key_prefix = %key_prefix, "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint_url(model))
            .header("x-goog-api-key", &api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            let parsed = serde_json::from_str::<GenerateContentResponse>(&body)?;
            Ok(parsed)
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(%status, model, "generateContent request rejected");
            Err(ApiConnectionError::Api {
                status,
                error_body,
                credential: CredentialHint::of(&api_key),
            })
        }
    }
}
