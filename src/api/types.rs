//! Wire types shared by the relay and the chat client

use crate::llm::MessageRole;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Author of a conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl From<ChatRole> for MessageRole {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::User => MessageRole::User,
            ChatRole::Assistant => MessageRole::Assistant,
        }
    }
}

/// One prior turn sent as context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Request to generate a reply
///
/// `message` is optional on the wire so that a missing field is reported
/// through the failure envelope rather than a framework rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conversation_history: Vec<HistoryEntry>,
}

/// An explicit `null` history means no history
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<HistoryEntry>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, conversation_history: Vec<HistoryEntry>) -> Self {
        Self {
            message: Some(message.into()),
            conversation_history,
        }
    }
}

/// Payload of a successful reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatData {
    pub response: String,
    pub model: String,
    pub usage: Value,
}

/// Uniform response envelope
///
/// Exactly one of `data` (success) or `message` (failure) is populated;
/// `error` only accompanies server-side failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChatData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatEnvelope {
    pub fn success(data: ChatData) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn client_error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn server_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(error.into()),
        }
    }

    /// Collapse into a result; a `success: true` envelope without data is a
    /// failure
    pub fn into_result(self) -> Result<ChatData, EnvelopeFailure> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (success, _) => Err(EnvelopeFailure {
                message: self.message.unwrap_or_else(|| {
                    if success {
                        "Response carried no data".to_string()
                    } else {
                        "Failed to get response".to_string()
                    }
                }),
                error: self.error,
            }),
        }
    }
}

/// Failure half of [`ChatEnvelope`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeFailure {
    pub message: String,
    pub error: Option<String>,
}

/// Response for the health probe
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub provider_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_camel_case_history() {
        let req = ChatRequest::new(
            "c",
            vec![
                HistoryEntry::new(ChatRole::User, "a"),
                HistoryEntry::new(ChatRole::Assistant, "b"),
            ],
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "message": "c",
                "conversationHistory": [
                    { "role": "user", "content": "a" },
                    { "role": "assistant", "content": "b" }
                ]
            })
        );
    }

    #[test]
    fn history_is_optional() {
        let req: ChatRequest = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert!(req.conversation_history.is_empty());

        let req: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.message.is_none());
    }

    #[test]
    fn null_history_reads_as_empty() {
        let req: ChatRequest =
            serde_json::from_value(json!({ "message": "hi", "conversationHistory": null }))
                .unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert!(req.conversation_history.is_empty());
    }

    #[test]
    fn system_role_is_rejected() {
        let parsed = serde_json::from_value::<ChatRequest>(json!({
            "message": "hi",
            "conversationHistory": [{ "role": "system", "content": "x" }]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn envelopes_serialize_one_variant() {
        let ok = serde_json::to_value(ChatEnvelope::success(ChatData {
            response: "r".into(),
            model: "m".into(),
            usage: json!({ "total_tokens": 1 }),
        }))
        .unwrap();
        assert_eq!(
            ok,
            json!({ "success": true, "data": { "response": "r", "model": "m", "usage": { "total_tokens": 1 } } })
        );

        let bad = serde_json::to_value(ChatEnvelope::client_error("Message is required")).unwrap();
        assert_eq!(bad, json!({ "success": false, "message": "Message is required" }));

        let failed = serde_json::to_value(ChatEnvelope::server_error("oops", "detail")).unwrap();
        assert_eq!(failed, json!({ "success": false, "message": "oops", "error": "detail" }));
    }

    #[test]
    fn into_result_reports_failures() {
        let failure = ChatEnvelope::server_error("oops", "detail").into_result().unwrap_err();
        assert_eq!(failure.message, "oops");
        assert_eq!(failure.error.as_deref(), Some("detail"));

        let hollow = ChatEnvelope {
            success: true,
            data: None,
            message: None,
            error: None,
        };
        assert!(hollow.into_result().is_err());
    }
}
