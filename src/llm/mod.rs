//! LLM client abstraction layer
//!
//! A trait-based seam for text generation so the analysis pipeline can run
//! against the real GenAI transport or a scripted mock interchangeably.

mod client;
mod error;
mod genai_client;
mod mock;
mod selector;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use genai_client::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use selector::{select_llm_client, SelectedClient};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
