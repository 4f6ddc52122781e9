use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;

/// Seam between the analyst and whatever produces text.
///
/// Implementations make exactly one wire request per `chat` call and report
/// failures as [`BackendError`]; retries and fallbacks are the caller's call.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError>;

    /// Provider label shown by `health`
    fn name(&self) -> &str;

    /// Model identifier, when the provider exposes one
    fn model_info(&self) -> Option<String> {
        None
    }
}
