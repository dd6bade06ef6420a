//! Backend API client for jarvis-chat
//!
//! This module implements the REST client for the assistant backend. The
//! chat call never surfaces an error to the caller: every failure class is
//! mapped to a canned user-facing reply so the conversation can continue,
//! and the read-side calls degrade to empty results with a warning log.

use crate::error::{JarvisError, Result};
use crate::mode::ChatMode;

use reqwest::{Client, StatusCode};
use std::sync::RwLock;
use std::time::Duration;

pub mod types;
pub use types::{
    ChatReply, ChatRequest, HealthStatus, HistoryMessage, HistoryResponse, RemoteSession,
    SessionsResponse,
};

/// Request timeout for chat and history calls (seconds)
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Shorter timeout for the health probe (seconds)
const HEALTH_TIMEOUT_SECS: u64 = 10;

/// Canned reply when a chat request times out
pub const TIMEOUT_REPLY: &str = "Sorry, the request timed out. Please try again.";

/// Canned reply when the backend cannot be reached
pub const CONNECTION_REPLY: &str = "Cannot connect to the server. Please check your connection.";

/// Canned reply when the backend returns HTTP 429
pub const RATE_LIMIT_REPLY: &str = "You've reached your daily API limit. Please try again later.";

/// Client for the assistant backend
///
/// Holds a single pooled HTTP client with a fixed request timeout and the
/// backend base URL. The base URL can be swapped at runtime when the user
/// changes the `api_url` setting.
///
/// # Examples
///
/// ```no_run
/// use jarvis_chat::api::ApiClient;
/// use jarvis_chat::mode::ChatMode;
///
/// # async fn example() -> jarvis_chat::error::Result<()> {
/// let client = ApiClient::new("http://localhost:8000")?;
/// let reply = client.send_message("Hello!", None, ChatMode::General).await;
/// println!("{}", reply.response);
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    client: Client,
    base_url: RwLock<String>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend base URL, e.g. `http://localhost:8000`
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a new API client with a specific request timeout
    ///
    /// This is primarily useful for tests where waiting out the full
    /// request timeout is not desirable.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jarvis-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JarvisError::Api(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::info!("Initialized API client: base_url={}", base_url);

        Ok(Self {
            client,
            base_url: RwLock::new(base_url),
        })
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> String {
        self.base_url
            .read()
            .map(|url| url.clone())
            .unwrap_or_default()
    }

    /// Update the base URL, stripping any trailing slash
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jarvis_chat::api::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:8000").unwrap();
    /// client.set_base_url("http://jarvis.local:9000/");
    /// assert_eq!(client.base_url(), "http://jarvis.local:9000");
    /// ```
    pub fn set_base_url(&self, url: &str) {
        if let Ok(mut base) = self.base_url.write() {
            *base = url.trim_end_matches('/').to_string();
            tracing::debug!("API base URL updated: {}", base);
        }
    }

    /// Build the full URL for an endpoint path
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url(), endpoint)
    }

    /// Send a message to the assistant
    ///
    /// Posts to `/chat` or `/chat/realtime` depending on `mode`. This call
    /// never fails: timeouts, connection errors, rate limiting, and server
    /// errors each produce a canned reply with the caller's session id
    /// echoed back, so the chat loop can always render something.
    ///
    /// # Arguments
    ///
    /// * `message` - The user's message text
    /// * `session_id` - Session identifier for conversation continuity
    /// * `mode` - Which endpoint variant handles the message
    pub async fn send_message(
        &self,
        message: &str,
        session_id: Option<&str>,
        mode: ChatMode,
    ) -> ChatReply {
        let url = self.endpoint_url(mode.endpoint());
        let request = ChatRequest {
            message: message.to_string(),
            session_id: session_id.map(|s| s.to_string()),
        };

        tracing::debug!("Sending message to {} (mode={})", url, mode);

        let fallback = |response: String| ChatReply {
            response,
            session_id: session_id.map(|s| s.to_string()),
        };

        match self.client.post(&url).json(&request).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    match response.json::<ChatReply>().await {
                        Ok(reply) => reply,
                        Err(e) => {
                            tracing::warn!("Failed to parse chat response: {}", e);
                            fallback(format!("An error occurred: {}", e))
                        }
                    }
                } else if status == StatusCode::TOO_MANY_REQUESTS {
                    tracing::warn!("Backend rate limit hit (429)");
                    fallback(RATE_LIMIT_REPLY.to_string())
                } else {
                    tracing::warn!("Backend returned error status {}", status);
                    fallback(format!("Server error: {}", status.as_u16()))
                }
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!("Chat request timed out: {}", e);
                fallback(TIMEOUT_REPLY.to_string())
            }
            Err(e) if e.is_connect() => {
                tracing::warn!("Cannot connect to backend: {}", e);
                fallback(CONNECTION_REPLY.to_string())
            }
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                fallback(format!("An error occurred: {}", e))
            }
        }
    }

    /// Fetch the message history for a session
    ///
    /// Any failure logs a warning and returns an empty history so callers
    /// can fall back to local storage.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session to fetch
    pub async fn get_history(&self, session_id: &str) -> HistoryResponse {
        let url = self.endpoint_url(&format!("/chat/history/{}", session_id));

        match self.client.get(&url).send().await {
            Ok(response) => match response.error_for_status() {
                Ok(response) => match response.json::<HistoryResponse>().await {
                    Ok(history) => history,
                    Err(e) => {
                        tracing::warn!("Failed to parse history response: {}", e);
                        HistoryResponse::default()
                    }
                },
                Err(e) => {
                    tracing::warn!("Error getting history: {}", e);
                    HistoryResponse::default()
                }
            },
            Err(e) => {
                tracing::warn!("Error getting history: {}", e);
                HistoryResponse::default()
            }
        }
    }

    /// List all chat sessions known to the backend
    ///
    /// Returns an empty list on any failure; callers fall back to the
    /// local session index.
    pub async fn list_sessions(&self) -> Vec<RemoteSession> {
        let url = self.endpoint_url("/chat/sessions");

        match self.client.get(&url).send().await {
            Ok(response) => match response.error_for_status() {
                Ok(response) => match response.json::<SessionsResponse>().await {
                    Ok(body) => body.sessions,
                    Err(e) => {
                        tracing::warn!("Failed to parse sessions response: {}", e);
                        Vec::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Error getting sessions: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!("Error getting sessions: {}", e);
                Vec::new()
            }
        }
    }

    /// Delete a chat session on the backend
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session to delete
    ///
    /// # Returns
    ///
    /// True if the backend confirmed the deletion
    pub async fn delete_session(&self, session_id: &str) -> bool {
        let url = self.endpoint_url(&format!("/chat/session/{}", session_id));

        match self.client.delete(&url).send().await {
            Ok(response) => match response.error_for_status() {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Error deleting session {}: {}", session_id, e);
                    false
                }
            },
            Err(e) => {
                tracing::warn!("Error deleting session {}: {}", session_id, e);
                false
            }
        }
    }

    /// Check backend health
    ///
    /// Uses a shorter timeout than the chat calls. Failures synthesize an
    /// error status instead of propagating.
    pub async fn health_check(&self) -> HealthStatus {
        let url = self.endpoint_url("/health");

        let result = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await;

        match result {
            Ok(response) => match response.error_for_status() {
                Ok(response) => match response.json::<HealthStatus>().await {
                    Ok(status) => status,
                    Err(e) => HealthStatus::error(e.to_string()),
                },
                Err(e) => HealthStatus::error(e.to_string()),
            },
            Err(e) => HealthStatus::error(e.to_string()),
        }
    }
}
