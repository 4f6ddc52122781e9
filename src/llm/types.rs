//! Wire-neutral shapes exchanged with an [`LLMClient`](super::LLMClient).

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Standing instructions, carries the analyst persona
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    fn with_role(role: MessageRole, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, content)
    }
}

/// One generation call. Sampling knobs left as `None` use the provider default.
#[derive(Debug, Clone, Default)]
pub struct LLMRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
}

impl LLMRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        LLMRequest {
            messages,
            ..Default::default()
        }
    }

    pub fn with_temperature(self, temperature: f32) -> Self {
        LLMRequest {
            temperature: Some(temperature),
            ..self
        }
    }

    pub fn with_max_tokens(self, max_tokens: u32) -> Self {
        LLMRequest {
            max_tokens: Some(max_tokens),
            ..self
        }
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find_map(|m| (m.role == MessageRole::System).then_some(m.content.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Generated text; empty when the provider returned no candidate
    pub content: String,
    /// Wall time of the round trip
    pub response_time: Duration,
}

impl LLMResponse {
    pub fn text(content: impl Into<String>, response_time: Duration) -> Self {
        LLMResponse {
            content: content.into(),
            response_time,
        }
    }

    /// True when there is nothing worth showing the operator
    pub fn is_blank(&self) -> bool {
        self.content.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_roles() {
        let persona = ChatMessage::system("You are a netrunner");
        assert_eq!(persona.role, MessageRole::System);
        assert_eq!(persona.content, "You are a netrunner");

        assert_eq!(ChatMessage::user("jack in").role, MessageRole::User);
        assert_eq!(ChatMessage::assistant("ICE ahead").role, MessageRole::Assistant);
    }

    #[test]
    fn test_analysis_request_shape() {
        let request = LLMRequest::new(vec![
            ChatMessage::system("persona"),
            ChatMessage::user("Component: Redis"),
        ])
        .with_temperature(0.9)
        .with_max_tokens(100);

        assert_eq!(request.temperature, Some(0.9));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.system_prompt(), Some("persona"));
        assert_eq!(LLMRequest::new(vec![ChatMessage::user("x")]).system_prompt(), None);
    }

    #[test]
    fn test_whitespace_only_reply_is_blank() {
        assert!(LLMResponse::text("", Duration::ZERO).is_blank());
        assert!(LLMResponse::text(" \t\n", Duration::from_millis(5)).is_blank());
        assert!(!LLMResponse::text("ICE breached", Duration::from_millis(5)).is_blank());
    }

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&ChatMessage::system("p")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"p"}"#);
    }
}
