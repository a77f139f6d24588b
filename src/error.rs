//! Error taxonomy for the generation flow and its user-facing rendering.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api_connection::ApiConnectionError;
use crate::config::CredentialHint;

pub const API_KEY_URL: &str = "https://aistudio.google.com/app/apikey";

/// Body fragments that mean the provider refused the credential.
const PERMISSION_SIGNATURES: &[&str] = &[
    "PERMISSION_DENIED",
    "The caller does not have permission",
    "API_KEY_INVALID",
    "API key not valid",
    "403",
];

/// Failures of the generation adapter.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API Key is missing or invalid. Please ensure {0} is configured.")]
    Configuration(String),

    #[error(transparent)]
    Upstream(#[from] ApiConnectionError),
}

/// What the controller shows when a search goes wrong.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Permission Denied (403): {detail}")]
    Permission { foreign_credential: bool, detail: String },

    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    pub fn empty_selection() -> Self {
        AppError::Validation("Please select at least one ingredient.".to_string())
    }

    pub fn from_generation(err: GenerationError) -> Self {
        match err {
            GenerationError::Configuration(_) => AppError::Configuration(err.to_string()),
            GenerationError::Upstream(ApiConnectionError::MissingApiKey(looked_in)) => {
                AppError::Configuration(GenerationError::Configuration(looked_in).to_string())
            }
            GenerationError::Upstream(upstream) => classify_upstream(&upstream),
        }
    }

    /// Multi-line text with remediation steps where there are any.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Configuration(msg) => format!(
                "{msg}\n\nSteps to fix:\n  1. Create a key at {API_KEY_URL}.\n  2. Export it as API_KEY (or GEMINI_API_KEY), or put it in a .env file.\n  3. Restart the app."
            ),
            AppError::Permission {
                foreign_credential: true,
                ..
            } => format!(
                "Permission Denied (403): the configured key does not look like a Google AI Studio key.\n\nSteps to fix:\n  1. Keys from other AI providers do not work here.\n  2. Create a Gemini key at {API_KEY_URL}.\n  3. Replace the key in your environment and restart."
            ),
            AppError::Permission { detail, .. } => format!(
                "Permission Denied (403): Your API Key is blocked or not enabled.\n({detail})\n\nSteps to fix:\n  1. Your current key is invalid. You need a new one.\n  2. Get a new key from Google AI Studio: {API_KEY_URL}\n  3. Update your settings with the new key."
            ),
            AppError::Upstream(msg) if msg.trim().is_empty() => {
                "Failed to generate recipes. Please try again.".to_string()
            }
            AppError::Upstream(msg) => msg.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Missing ingredients",
            AppError::Configuration(_) => "Configuration problem",
            AppError::Permission { .. } => "Permission denied",
            AppError::Upstream(_) => "Recipe generation failed",
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::from_generation(err)
    }
}

fn classify_upstream(err: &ApiConnectionError) -> AppError {
    if let ApiConnectionError::Api {
        status, credential, ..
    } = err
    {
        let message = err.provider_message();
        let denied = *status == StatusCode::FORBIDDEN
            || *status == StatusCode::UNAUTHORIZED
            || looks_like_permission_denied(&message)
            || looks_like_permission_denied(&err.to_string());
        if denied {
            return AppError::Permission {
                foreign_credential: *credential == CredentialHint::Foreign,
                detail: message,
            };
        }
        return AppError::Upstream(message);
    }
    let text = err.to_string();
    if looks_like_permission_denied(&text) {
        return AppError::Permission {
            foreign_credential: false,
            detail: text,
        };
    }
    AppError::Upstream(text)
}

pub fn looks_like_permission_denied(text: &str) -> bool {
    PERMISSION_SIGNATURES.iter().any(|sig| text.contains(sig))
}
