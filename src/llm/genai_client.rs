//! Remote uplink over the `genai` crate.
//!
//! Gemini is the default provider but any adapter `genai` knows about works.
//! The credential is handed in by the caller rather than read from the
//! provider's own environment variable, so "configured" means exactly one
//! thing: the operator supplied a key.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Status codes worth pulling out of a provider error message
const KNOWN_STATUSES: [u16; 8] = [400, 401, 403, 404, 429, 500, 502, 503];

pub struct GenAIClient {
    inner: Client,
    provider: AdapterKind,
    model: String,
    /// Deadline for one round trip
    deadline: Duration,
}

impl GenAIClient {
    /// `model` is the bare model name. `base_url` replaces the provider's
    /// default endpoint, for gateways and local proxies.
    pub fn new(
        provider: AdapterKind,
        model: String,
        api_key: String,
        base_url: Option<String>,
        deadline: Duration,
    ) -> Self {
        debug!(
            provider = provider.as_str(),
            model = %model,
            endpoint = base_url.as_deref().unwrap_or("default"),
            "Building genai uplink"
        );

        let inner = Client::builder()
            .with_service_target_resolver(pinned_target(provider, &model, api_key, base_url))
            .build();

        GenAIClient {
            inner,
            provider,
            model,
            deadline,
        }
    }
}

/// Resolver that ignores whatever `genai` would infer and always targets our
/// provider, model and credential.
fn pinned_target(
    provider: AdapterKind,
    model: &str,
    api_key: String,
    base_url: Option<String>,
) -> ServiceTargetResolver {
    let model = ModelIden::new(provider, model);
    ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let endpoint = base_url
                .clone()
                .map(Endpoint::from_owned)
                .unwrap_or(target.endpoint);
            Ok(ServiceTarget {
                endpoint,
                auth: AuthData::from_single(api_key.clone()),
                model: model.clone(),
            })
        },
    )
}

fn to_genai(message: &ChatMessage) -> GenAIChatMessage {
    let text = message.content.as_str();
    match message.role {
        MessageRole::System => GenAIChatMessage::system(text),
        MessageRole::User => GenAIChatMessage::user(text),
        MessageRole::Assistant => GenAIChatMessage::assistant(text),
    }
}

fn sampling(request: &LLMRequest) -> ChatOptions {
    let options = ChatOptions::default();
    let options = match request.temperature {
        Some(t) => options.with_temperature(f64::from(t)),
        None => options,
    };
    match request.max_tokens {
        Some(n) => options.with_max_tokens(n),
        None => options,
    }
}

/// Maps a provider failure onto [`BackendError`], keeping the HTTP status
/// when the message carries one.
fn classify(provider: AdapterKind, detail: String) -> BackendError {
    let status = KNOWN_STATUSES
        .into_iter()
        .find(|code| detail.contains(&code.to_string()));

    match status {
        Some(401) | Some(403) => BackendError::AuthenticationError {
            message: format!("{} refused the key: {}", provider.as_str(), detail),
        },
        _ => BackendError::ApiError {
            message: format!("{}: {}", provider.as_str(), detail),
            status_code: status,
        },
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let started = Instant::now();
        let options = sampling(&request);
        let outgoing = GenAIChatRequest::new(request.messages.iter().map(to_genai).collect());

        let call = self.inner.exec_chat(&self.model, outgoing, Some(&options));
        let reply = tokio::time::timeout(self.deadline, call)
            .await
            .map_err(|_| {
                warn!(provider = self.provider.as_str(), seconds = self.deadline.as_secs(), "Uplink timed out");
                BackendError::TimeoutError {
                    seconds: self.deadline.as_secs(),
                }
            })?
            .map_err(|e| {
                warn!(provider = self.provider.as_str(), error = %e, "Uplink request failed");
                classify(self.provider, e.to_string())
            })?;

        let text = reply.first_text().unwrap_or_default();
        Ok(LLMResponse::text(text, started.elapsed()))
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
