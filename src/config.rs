//! Process configuration, read from the environment once at startup.

use std::env;

use crate::error::ApiError;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Local frontend dev servers allowed to call the API cross-origin.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5175",
    "http://localhost:3000",
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Credential for the completion API. `None` when unset or empty.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API, without a trailing slash.
    pub api_base_url: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let allowed_origins = match non_empty("CORS_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Self {
            bind_address: non_empty("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            api_key: non_empty("OPENAI_API_KEY"),
            api_base_url: non_empty("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            allowed_origins,
        }
    }

    /// The API credential, or a configuration error if it was never set.
    pub fn require_api_key(&self) -> Result<&str, ApiError> {
        self.api_key.as_deref().ok_or(ApiError::Configuration)
    }
}
