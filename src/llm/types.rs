//! Common types for completion requests

use serde_json::Value;

/// Sampling parameters sent with every completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// Completion request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<LlmMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmRequest {
    pub fn new(messages: Vec<LlmMessage>, sampling: SamplingSettings) -> Self {
        Self {
            messages,
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
        }
    }
}

/// Message in the prompt sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

impl LlmMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Completion response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Content of the first choice, if the provider returned any
    pub content: Option<String>,
    /// Model identifier as reported by the provider
    pub model: String,
    /// Provider usage metadata, kept verbatim
    pub usage: Value,
}

impl LlmResponse {
    /// First choice's text, or `fallback` when it is missing or empty
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.content.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(content: Option<&str>) -> LlmResponse {
        LlmResponse {
            content: content.map(str::to_string),
            model: "m".to_string(),
            usage: json!({}),
        }
    }

    #[test]
    fn text_or_prefers_content() {
        assert_eq!(response(Some("hi")).text_or("fallback"), "hi");
    }

    #[test]
    fn text_or_falls_back_on_missing_or_empty() {
        assert_eq!(response(None).text_or("fallback"), "fallback");
        assert_eq!(response(Some("")).text_or("fallback"), "fallback");
    }
}
