//! Configuration management for overseer
//!
//! Settings are loaded from environment variables with sensible defaults.
//! CLI flags override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `OVERSEER_PROVIDER`: genai adapter (gemini|openai|anthropic|ollama|groq|xai|...) - default: "gemini"
//! - `OVERSEER_MODEL`: Model name - default: "gemini-2.5-flash"
//! - `OVERSEER_API_KEY`: Service credential. Falls back to `API_KEY`, then the
//!   provider's own variable (e.g. `GEMINI_API_KEY`). Without one, analysis runs
//!   from the local intel database only.
//! - `OVERSEER_API_BASE_URL`: Optional custom endpoint
//! - `OVERSEER_REQUEST_TIMEOUT`: Timeout in seconds - default: "30"
//! - `OVERSEER_LOCALE`: en-US|zh-CN - default: "zh-CN"
//! - `OVERSEER_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use overseer::OverseerConfig;
//!
//! let config = OverseerConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::locale::Locale;
use genai::adapter::AdapterKind;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_PROVIDER: AdapterKind = AdapterKind::Gemini;
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider: {0}. Valid options: gemini, openai, anthropic, ollama, groq, xai")]
    InvalidProvider(String),

    #[error("{0}")]
    InvalidLocale(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Clone)]
pub struct OverseerConfig {
    /// Text-generation provider (from genai)
    pub provider: AdapterKind,

    /// Model name to use for flavor analysis (provider-specific)
    pub model: String,

    /// Service credential; `None` means the remote link is unconfigured
    pub api_key: Option<String>,

    /// Optional endpoint override
    pub api_base_url: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Language for logs, prompts and offline intel
    pub locale: Locale,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for OverseerConfig {
    /// Loads from `OVERSEER_*` environment variables, falling back to defaults
    /// for anything missing or unparsable. Use [`OverseerConfig::from_env`] to
    /// surface parse failures instead.
    fn default() -> Self {
        let provider = env::var("OVERSEER_PROVIDER")
            .ok()
            .and_then(|s| parse_provider(&s).ok())
            .unwrap_or(DEFAULT_PROVIDER);

        let model = non_empty_var("OVERSEER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let request_timeout_secs = env::var("OVERSEER_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let locale = env::var("OVERSEER_LOCALE")
            .ok()
            .and_then(|v| v.parse::<Locale>().ok())
            .unwrap_or_default();

        let log_level = env::var("OVERSEER_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            provider,
            model,
            api_key: resolve_api_key(provider),
            api_base_url: non_empty_var("OVERSEER_API_BASE_URL"),
            request_timeout_secs,
            locale,
            log_level,
        }
    }
}

impl OverseerConfig {
    /// Strict variant of `default()`: invalid values are errors, not silently replaced
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty_var("OVERSEER_PROVIDER") {
            config.provider = parse_provider(&raw)?;
            config.api_key = resolve_api_key(config.provider);
        }

        if let Some(raw) = non_empty_var("OVERSEER_REQUEST_TIMEOUT") {
            config.request_timeout_secs =
                raw.parse::<u64>().map_err(|e| ConfigError::ParseError {
                    field: "OVERSEER_REQUEST_TIMEOUT".to_string(),
                    error: e.to_string(),
                })?;
        }

        if let Some(raw) = non_empty_var("OVERSEER_LOCALE") {
            config.locale = raw.parse().map_err(ConfigError::InvalidLocale)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks numeric ranges and the log level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("provider".to_string(), self.provider.as_str().to_string());
        map.insert("model".to_string(), self.model.clone());
        map.insert(
            "credential".to_string(),
            if self.has_credentials() { "set" } else { "not set" }.to_string(),
        );
        if let Some(ref url) = self.api_base_url {
            map.insert("api_base_url".to_string(), url.clone());
        }
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert("locale".to_string(), self.locale.to_string());
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for OverseerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overseer Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider.as_str())?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(
            f,
            "  Credential: {}",
            if self.has_credentials() { "set" } else { "not set (offline intel only)" }
        )?;
        if let Some(ref url) = self.api_base_url {
            writeln!(f, "  API Base URL: {}", url)?;
        }
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Locale: {}", self.locale)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

impl fmt::Debug for OverseerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverseerConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("locale", &self.locale)
            .field("log_level", &self.log_level)
            .finish()
    }
}

pub fn parse_provider(s: &str) -> Result<AdapterKind, ConfigError> {
    AdapterKind::from_lower_str(&s.trim().to_lowercase())
        .ok_or_else(|| ConfigError::InvalidProvider(s.to_string()))
}

fn resolve_api_key(provider: AdapterKind) -> Option<String> {
    non_empty_var("OVERSEER_API_KEY")
        .or_else(|| non_empty_var("API_KEY"))
        .or_else(|| provider.default_key_env_name().and_then(non_empty_var))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
