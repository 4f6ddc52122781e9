//! Scripted client for exercising the analysis pipeline without a network.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// One scripted outcome, consumed by exactly one `chat` call
#[derive(Debug, Clone)]
pub enum MockResponse {
    Reply(String),
    Fail(BackendError),
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        MockResponse::Reply(content.into())
    }

    pub fn error(error: BackendError) -> Self {
        MockResponse::Fail(error)
    }
}

#[derive(Default)]
struct Script {
    pending: VecDeque<MockResponse>,
    received: Vec<LLMRequest>,
}

/// Replays a queue of outcomes in order and keeps every request it was sent.
/// An exhausted queue answers with [`BackendError::Other`].
pub struct MockLLMClient {
    script: Mutex<Script>,
    name: String,
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self::with_name("Mock")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        MockLLMClient {
            script: Mutex::new(Script::default()),
            name: name.into(),
        }
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_response(&self, response: MockResponse) {
        self.script().pending.push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        self.script().pending.extend(responses);
    }

    pub fn remaining_responses(&self) -> usize {
        self.script().pending.len()
    }

    pub fn call_count(&self) -> usize {
        self.script().received.len()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<LLMRequest> {
        self.script().received.clone()
    }
}

impl Default for MockLLMClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let next = {
            let mut script = self.script();
            script.received.push(request);
            script.pending.pop_front()
        };

        match next {
            Some(MockResponse::Reply(text)) => Ok(LLMResponse::text(text, Duration::from_millis(3))),
            Some(MockResponse::Fail(err)) => Err(err),
            None => Err(BackendError::Other {
                message: format!("{}: script exhausted", self.name),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockLLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let script = self.script();
        f.debug_struct("MockLLMClient")
            .field("name", &self.name)
            .field("pending", &script.pending.len())
            .field("received", &script.received.len())
            .finish()
    }
}
