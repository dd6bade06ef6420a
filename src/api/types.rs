//! Wire types for the assistant backend API
//!
//! The backend does not publish a schema; these shapes mirror what the
//! service actually sends and ignore any fields it adds later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat` and `POST /chat/realtime`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The user's message text
    pub message: String,
    /// Session identifier for conversation continuity, omitted on the
    /// first exchange
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Assistant reply from the chat endpoints
///
/// Also synthesized locally when a request fails, carrying a canned
/// user-facing string in `response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text
    pub response: String,
    /// Session identifier assigned (or echoed back) by the backend
    #[serde(default)]
    pub session_id: Option<String>,
}

/// One message in a remote session history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Message sender role ("user" or "assistant")
    pub role: String,
    /// Message text
    #[serde(default)]
    pub content: String,
}

impl HistoryMessage {
    /// Whether this message was sent by the user
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

/// Response body for `GET /chat/history/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    /// Ordered message list for the session
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

/// One session summary from `GET /chat/sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSession {
    /// Opaque session identifier
    pub session_id: String,
    /// Preview text (typically the first user message)
    #[serde(default)]
    pub preview: String,
    /// Last-activity timestamp
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Response body for `GET /chat/sessions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionsResponse {
    /// Known sessions, most recent first
    #[serde(default)]
    pub sessions: Vec<RemoteSession>,
}

/// Response body for `GET /health`
///
/// Synthesized locally with `status: "error"` when the check fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Server-reported status ("ok", "healthy", ...) or "error"
    #[serde(default)]
    pub status: String,
    /// Optional detail message (set on synthesized errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    /// Build a synthesized error status from a failed health check
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }

    /// Whether the backend reported itself healthy
    pub fn is_healthy(&self) -> bool {
        self.status != "error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_omits_missing_session_id() {
        let request = ChatRequest {
            message: "hello".to_string(),
            session_id: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("session_id"));
    }

    #[test]
    fn test_chat_request_includes_session_id() {
        let request = ChatRequest {
            message: "hello".to_string(),
            session_id: Some("abc-123".to_string()),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"session_id\":\"abc-123\""));
    }

    #[test]
    fn test_chat_reply_tolerates_missing_session_id() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert_eq!(reply.response, "hi");
        assert!(reply.session_id.is_none());
    }

    #[test]
    fn test_history_response_defaults_to_empty() {
        let history: HistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(history.messages.is_empty());
    }

    #[test]
    fn test_history_message_role_check() {
        let msg = HistoryMessage {
            role: "user".to_string(),
            content: "hi".to_string(),
        };
        assert!(msg.is_user());
        let msg = HistoryMessage {
            role: "assistant".to_string(),
            content: "hello".to_string(),
        };
        assert!(!msg.is_user());
    }

    #[test]
    fn test_health_status_error_constructor() {
        let status = HealthStatus::error("connection refused");
        assert_eq!(status.status, "error");
        assert_eq!(status.message.as_deref(), Some("connection refused"));
        assert!(!status.is_healthy());
    }

    #[test]
    fn test_health_status_healthy() {
        let status: HealthStatus = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(status.is_healthy());
        assert!(status.message.is_none());
    }
}
