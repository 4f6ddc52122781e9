use crate::config::OverseerConfig;
use crate::llm::{GenAIClient, LLMClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct SelectedClient {
    pub client: Arc<dyn LLMClient>,
    pub description: String,
}

/// Builds the remote client for the configured provider.
///
/// Returns `None` when no credential is available; callers treat that as an
/// unconfigured link and go straight to offline intel. No network traffic
/// happens here.
pub fn select_llm_client(config: &OverseerConfig) -> Option<SelectedClient> {
    let Some(api_key) = config.api_key.clone() else {
        debug!(
            "Skipping {} - no credentials available",
            config.provider.as_str()
        );
        return None;
    };

    let client = GenAIClient::new(
        config.provider,
        config.model.clone(),
        api_key,
        config.api_base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    );

    info!(
        "Using configured provider: {} ({})",
        config.provider.as_str(),
        config.model
    );

    Some(SelectedClient {
        client: Arc::new(client),
        description: format!("{} ({})", config.provider.as_str(), config.model),
    })
}
