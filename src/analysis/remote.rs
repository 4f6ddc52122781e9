//! Remote flavor analysis over an [`LLMClient`].
//!
//! One attempt per call, no retries and no knowledge of the offline path.
//! Without a client the call fails with [`RemoteError::Unconfigured`] before
//! anything touches the network.

use crate::llm::{BackendError, ChatMessage, LLMClient, LLMRequest};
use crate::locale::Locale;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Sampling temperature for flavor text
pub const ANALYSIS_TEMPERATURE: f32 = 0.9;

/// Output bound for one analysis, in tokens
pub const ANALYSIS_MAX_TOKENS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("no service credential configured")]
    Unconfigured,

    #[error("remote analysis failed: {0}")]
    Transport(String),

    #[error("remote service returned no usable text")]
    EmptyResponse,
}

impl From<BackendError> for RemoteError {
    fn from(err: BackendError) -> Self {
        RemoteError::Transport(err.to_string())
    }
}

#[derive(Clone)]
pub struct RemoteAnalyst {
    client: Option<Arc<dyn LLMClient>>,
}

impl RemoteAnalyst {
    pub fn new(client: Option<Arc<dyn LLMClient>>) -> Self {
        Self { client }
    }

    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Name of the backing client, if any
    pub fn backend_name(&self) -> Option<&str> {
        self.client.as_deref().map(|c| c.name())
    }

    /// Asks the remote service for flavor text about `name`.
    pub async fn request_analysis(
        &self,
        name: &str,
        status_text: &str,
        locale: Locale,
    ) -> Result<String, RemoteError> {
        let client = self.client.as_ref().ok_or(RemoteError::Unconfigured)?;

        let request = build_request(name, status_text, locale);
        debug!(component = name, locale = %locale, backend = client.name(), "Requesting remote analysis");

        let response = client.chat(request).await.map_err(|err| {
            debug!(
                component = name,
                transient = err.is_transient(),
                status = ?err.status_code(),
                "Remote analysis failed"
            );
            RemoteError::from(err)
        })?;

        if response.is_blank() {
            return Err(RemoteError::EmptyResponse);
        }

        debug!(
            component = name,
            response_time_ms = response.response_time.as_millis(),
            "Remote analysis received"
        );
        Ok(response.content.trim().to_string())
    }
}

impl std::fmt::Debug for RemoteAnalyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAnalyst")
            .field("backend", &self.backend_name())
            .finish()
    }
}

/// The user prompt for one component in `locale`
pub fn build_prompt(name: &str, status_text: &str, locale: Locale) -> String {
    locale.catalog().render_prompt(name, status_text)
}

fn build_request(name: &str, status_text: &str, locale: Locale) -> LLMRequest {
    LLMRequest::new(vec![
        ChatMessage::system(locale.catalog().persona),
        ChatMessage::user(build_prompt(name, status_text, locale)),
    ])
    .with_temperature(ANALYSIS_TEMPERATURE)
    .with_max_tokens(ANALYSIS_MAX_TOKENS)
}
