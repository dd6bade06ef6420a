//! Integration tests for the backend API client
//!
//! Each failure class of the chat call must map to its canned user-facing
//! reply, and the read-side calls must degrade to empty results. Backed by
//! a wiremock server standing in for the assistant backend.

use serde_json::json;
use std::time::Duration;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jarvis_chat::api::{ApiClient, CONNECTION_REPLY, RATE_LIMIT_REPLY, TIMEOUT_REPLY};
use jarvis_chat::mode::ChatMode;

#[tokio::test]
async fn test_send_message_success_returns_reply_and_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"message": "Hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Good evening.",
            "session_id": "sess-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let reply = client.send_message("Hello", None, ChatMode::General).await;

    assert_eq!(reply.response, "Good evening.");
    assert_eq!(reply.session_id.as_deref(), Some("sess-1"));
}

#[tokio::test]
async fn test_send_message_includes_session_id_in_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"message": "More", "session_id": "sess-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Continuing.",
            "session_id": "sess-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let reply = client
        .send_message("More", Some("sess-1"), ChatMode::General)
        .await;
    assert_eq!(reply.response, "Continuing.");
}

#[tokio::test]
async fn test_send_message_realtime_mode_uses_realtime_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/realtime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Fast answer.",
            "session_id": "sess-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let reply = client
        .send_message("Quick", None, ChatMode::Realtime)
        .await;
    assert_eq!(reply.response, "Fast answer.");
}

#[tokio::test]
async fn test_send_message_rate_limited_maps_to_canned_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let reply = client
        .send_message("Hello", Some("sess-1"), ChatMode::General)
        .await;

    assert_eq!(reply.response, RATE_LIMIT_REPLY);
    // Caller's session id is echoed back so the conversation continues
    assert_eq!(reply.session_id.as_deref(), Some("sess-1"));
}

#[tokio::test]
async fn test_send_message_server_error_maps_to_status_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let reply = client.send_message("Hello", None, ChatMode::General).await;

    assert_eq!(reply.response, "Server error: 500");
    assert!(reply.session_id.is_none());
}

#[tokio::test]
async fn test_send_message_timeout_maps_to_canned_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "too late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_timeout(server.uri(), Duration::from_millis(200)).unwrap();
    let reply = client
        .send_message("Hello", Some("sess-1"), ChatMode::General)
        .await;

    assert_eq!(reply.response, TIMEOUT_REPLY);
    assert_eq!(reply.session_id.as_deref(), Some("sess-1"));
}

#[tokio::test]
async fn test_send_message_connection_error_maps_to_canned_reply() {
    // Nothing listens on this port
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let reply = client.send_message("Hello", None, ChatMode::General).await;

    assert_eq!(reply.response, CONNECTION_REPLY);
}

#[tokio::test]
async fn test_send_message_malformed_body_maps_to_generic_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let reply = client.send_message("Hello", None, ChatMode::General).await;

    assert!(reply.response.starts_with("An error occurred:"));
}

#[tokio::test]
async fn test_get_history_returns_messages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chat/history/sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Good evening."}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let history = client.get_history("sess-1").await;

    assert_eq!(history.messages.len(), 2);
    assert!(history.messages[0].is_user());
    assert_eq!(history.messages[1].content, "Good evening.");
}

#[tokio::test]
async fn test_get_history_failure_returns_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chat/history/sess-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let history = client.get_history("sess-1").await;
    assert!(history.messages.is_empty());
}

#[tokio::test]
async fn test_list_sessions_returns_sessions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chat/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [
                {"session_id": "sess-1", "preview": "Weather"},
                {"session_id": "sess-2", "preview": "Telemetry"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let sessions = client.list_sessions().await;

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].session_id, "sess-1");
    assert_eq!(sessions[1].preview, "Telemetry");
}

#[tokio::test]
async fn test_list_sessions_failure_returns_empty() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    assert!(client.list_sessions().await.is_empty());
}

#[tokio::test]
async fn test_delete_session_success_and_failure() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/chat/session/sess-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/chat/session/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    assert!(client.delete_session("sess-1").await);
    assert!(!client.delete_session("missing").await);
}

#[tokio::test]
async fn test_health_check_reports_healthy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let status = client.health_check().await;
    assert!(status.is_healthy());
    assert_eq!(status.status, "ok");
}

#[tokio::test]
async fn test_health_check_synthesizes_error_status() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let status = client.health_check().await;

    assert_eq!(status.status, "error");
    assert!(!status.is_healthy());
    assert!(status.message.is_some());
}
