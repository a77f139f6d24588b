//! Runtime configuration.
//!
//! Everything comes from environment variables (a `.env` file is honoured),
//! with a handful of CLI flags layered on top in `main`. The credential is
//! never stored here: `ApiKeySource` only says where to look, and the lookup
//! happens again on every request.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::api_connection::endpoints::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use crate::favorites::FAVORITES_STORAGE_KEY;

pub const API_KEY_ENV_VAR: &str = "API_KEY";
pub const FALLBACK_API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

pub const API_BASE_ENV_VAR: &str = "SMART_RECIPE_API_BASE";
pub const TEXT_MODEL_ENV_VAR: &str = "SMART_RECIPE_TEXT_MODEL";
pub const IMAGE_MODEL_ENV_VAR: &str = "SMART_RECIPE_IMAGE_MODEL";
pub const CHAT_MODEL_ENV_VAR: &str = "SMART_RECIPE_CHAT_MODEL";
pub const DATA_DIR_ENV_VAR: &str = "SMART_RECIPE_DATA_DIR";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const APP_DIR_NAME: &str = "smart-recipe";

/// Key prefixes handed out by other AI providers. Seeing one of these in a
/// rejected request means the user pasted the wrong provider's key.
const FOREIGN_KEY_PREFIXES: &[&str] = &["sk-or-", "sk-ant-", "sk-", "gsk_", "xai-", "pplx-"];
const GOOGLE_KEY_PREFIX: &str = "AIza";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Checked in order; the first variable holding a usable key wins.
    Env { vars: Vec<String> },
    Fixed(String),
}

impl Default for ApiKeySource {
    fn default() -> Self {
        Self::Env {
            vars: vec![
                API_KEY_ENV_VAR.to_string(),
                FALLBACK_API_KEY_ENV_VAR.to_string(),
            ],
        }
    }
}

impl ApiKeySource {
    pub fn env(var: impl Into<String>) -> Self {
        Self::Env {
            vars: vec![var.into()],
        }
    }

    /// Resolve the credential right now. Returns `None` when nothing usable is configured.
    pub fn resolve(&self) -> Option<String> {
        match self {
            ApiKeySource::Fixed(key) => normalize_api_key(key),
            ApiKeySource::Env { vars } => {
                dotenv().ok();
                vars.iter()
                    .filter_map(|var| env::var(var).ok())
                    .find_map(|raw| normalize_api_key(&raw))
            }
        }
    }

    /// Human readable description used in remediation messages.
    pub fn describe(&self) -> String {
        match self {
            ApiKeySource::Fixed(_) => "the configured API key".to_string(),
            ApiKeySource::Env { vars } => vars.join(" or "),
        }
    }
}

/// Build tools and shells leave all sorts of junk in key variables: blank
/// strings, the literal `undefined`, surrounding quotes.
pub fn normalize_api_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        return None;
    }
    let unquoted = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix(['"', '\'']).unwrap_or(unquoted).trim();
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialHint {
    Google,
    Foreign,
    Unknown,
}

impl CredentialHint {
    pub fn of(key: &str) -> Self {
        if key.starts_with(GOOGLE_KEY_PREFIX) {
            CredentialHint::Google
        } else if FOREIGN_KEY_PREFIXES.iter().any(|p| key.starts_with(p)) {
            CredentialHint::Foreign
        } else {
            CredentialHint::Unknown
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKeySource,
    pub api_base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub chat_model: String,
    pub text_temperature: f32,
    pub data_dir: PathBuf,
    pub favorites_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            api_key: ApiKeySource::default(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            text_temperature: 0.7,
            favorites_path: favorites_file_in(&data_dir),
            data_dir,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv().ok();
        let mut config = Self::default();

        if let Some(base) = non_empty_var(API_BASE_ENV_VAR) {
            config.api_base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = non_empty_var(TEXT_MODEL_ENV_VAR) {
            config.text_model = model;
        }
        if let Some(model) = non_empty_var(IMAGE_MODEL_ENV_VAR) {
            config.image_model = model;
        }
        if let Some(model) = non_empty_var(CHAT_MODEL_ENV_VAR) {
            config.chat_model = model;
        }
        if let Some(dir) = non_empty_var(DATA_DIR_ENV_VAR) {
            config.data_dir = PathBuf::from(dir);
            config.favorites_path = favorites_file_in(&config.data_dir);
        }
        config
    }

    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key = ApiKeySource::env(var);
        self
    }

    pub fn with_favorites_path(mut self, path: PathBuf) -> Self {
        self.favorites_path = path;
        self
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn favorites_file_in(dir: &std::path::Path) -> PathBuf {
    dir.join(format!("{FAVORITES_STORAGE_KEY}.json"))
}
