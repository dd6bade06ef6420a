//! Document types for the local JSON store
//!
//! Each document is one flat JSON file. Field-level serde defaults give the
//! merge-over-defaults behavior: a partial or missing file always
//! deserializes into a complete document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application settings (`settings.json`)
///
/// Loaded once at startup, mutated by the settings command and the chat
/// loop, written back on explicit save and on shutdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// UI theme preference ("dark" or "light")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Accent color scheme preference
    #[serde(default = "default_color_scheme")]
    pub color_scheme: String,

    /// Font size preference ("small", "medium", "large")
    #[serde(default = "default_font_size")]
    pub font_size: String,

    /// Speak assistant replies through the TTS engine
    #[serde(default)]
    pub tts: bool,

    /// Backend base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Enable notifications
    #[serde(default = "default_true")]
    pub notifications: bool,

    /// Persist the session and messages after every exchange
    #[serde(default = "default_true")]
    pub auto_save: bool,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_color_scheme() -> String {
    "purple".to_string()
}

fn default_font_size() -> String {
    "medium".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            color_scheme: default_color_scheme(),
            font_size: default_font_size(),
            tts: false,
            api_url: default_api_url(),
            notifications: default_true(),
            auto_save: default_true(),
        }
    }
}

/// Usage statistics (`stats.json`)
///
/// Mutated after every completed exchange and on export. No atomicity or
/// concurrent-writer protection; last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    /// Total messages exchanged (user and assistant turns both count)
    #[serde(default)]
    pub total_messages: u64,

    /// Number of transcript exports performed
    #[serde(default)]
    pub exported_count: u64,

    /// Timestamp of the most recent login
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,

    /// Consecutive-day login streak
    #[serde(default)]
    pub streak: u32,

    /// Display name shown in the stats summary
    #[serde(rename = "userName", default = "default_user_name")]
    pub user_name: String,
}

fn default_user_name() -> String {
    "Tony Stark".to_string()
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_messages: 0,
            exported_count: 0,
            last_login: None,
            streak: 0,
            user_name: default_user_name(),
        }
    }
}

impl Stats {
    /// Derive the user level from the message count
    ///
    /// Thresholds: <10 → 1, <50 → 2, <100 → 3, <500 → 4, <1000 → 5,
    /// otherwise 6.
    pub fn level(&self) -> u8 {
        match self.total_messages {
            0..=9 => 1,
            10..=49 => 2,
            50..=99 => 3,
            100..=499 => 4,
            500..=999 => 5,
            _ => 6,
        }
    }

    /// Record a login at `now`, updating `last_login` and the streak
    ///
    /// A same-day login leaves the streak unchanged, a login on the day
    /// after the previous one increments it, and a longer gap (or a first
    /// login) resets it to 1.
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        self.streak = match self.last_login {
            Some(prev) if prev.date_naive() == today => self.streak.max(1),
            Some(prev) if prev.date_naive().succ_opt() == Some(today) => self.streak + 1,
            _ => 1,
        };
        self.last_login = Some(now);
    }
}

/// One entry in the local session index (`sessions.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Opaque session identifier assigned by the backend
    pub session_id: String,
    /// Preview text (first user message, truncated)
    #[serde(default)]
    pub preview: String,
    /// Last-activity timestamp
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Wrapper document for the session index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionIndex {
    #[serde(default)]
    pub sessions: Vec<SessionEntry>,
}

/// One persisted chat message (`messages_{session_id}.json` entries)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Message sender role ("user" or "assistant")
    pub role: String,
    /// Message text
    pub text: String,
    /// When the message was added
    pub timestamp: DateTime<Utc>,
}

impl StoredMessage {
    /// Create a user message stamped with the current time
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message stamped with the current time
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether this message was sent by the user
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

/// Wrapper document for a per-session message log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.color_scheme, "purple");
        assert_eq!(settings.font_size, "medium");
        assert!(!settings.tts);
        assert_eq!(settings.api_url, "http://localhost:8000");
        assert!(settings.notifications);
        assert!(settings.auto_save);
    }

    #[test]
    fn test_settings_partial_document_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.api_url, "http://localhost:8000");
        assert!(settings.auto_save);
    }

    #[test]
    fn test_stats_partial_document_fills_defaults() {
        let stats: Stats = serde_json::from_str(r#"{"total_messages":42}"#).unwrap();
        assert_eq!(stats.total_messages, 42);
        assert_eq!(stats.exported_count, 0);
        assert_eq!(stats.user_name, "Tony Stark");
        assert!(stats.last_login.is_none());
    }

    #[test]
    fn test_stats_user_name_serializes_as_camel_case() {
        let stats = Stats::default();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"userName\""));
    }

    #[test]
    fn test_stats_level_thresholds() {
        let mut stats = Stats::default();
        let cases = [
            (0, 1),
            (9, 1),
            (10, 2),
            (49, 2),
            (50, 3),
            (99, 3),
            (100, 4),
            (499, 4),
            (500, 5),
            (999, 5),
            (1000, 6),
            (5000, 6),
        ];
        for (messages, level) in cases {
            stats.total_messages = messages;
            assert_eq!(stats.level(), level, "messages={}", messages);
        }
    }

    #[test]
    fn test_record_login_first_login_starts_streak() {
        let mut stats = Stats::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        stats.record_login(now);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.last_login, Some(now));
    }

    #[test]
    fn test_record_login_same_day_keeps_streak() {
        let mut stats = Stats {
            streak: 4,
            last_login: Some(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()),
            ..Default::default()
        };
        stats.record_login(Utc.with_ymd_and_hms(2024, 3, 10, 21, 0, 0).unwrap());
        assert_eq!(stats.streak, 4);
    }

    #[test]
    fn test_record_login_next_day_increments_streak() {
        let mut stats = Stats {
            streak: 4,
            last_login: Some(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()),
            ..Default::default()
        };
        stats.record_login(Utc.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap());
        assert_eq!(stats.streak, 5);
    }

    #[test]
    fn test_record_login_gap_resets_streak() {
        let mut stats = Stats {
            streak: 9,
            last_login: Some(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()),
            ..Default::default()
        };
        stats.record_login(Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap());
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn test_stored_message_constructors() {
        let user = StoredMessage::user("hello");
        assert_eq!(user.role, "user");
        assert_eq!(user.text, "hello");
        assert!(user.is_user());

        let assistant = StoredMessage::assistant("hi there");
        assert_eq!(assistant.role, "assistant");
        assert!(!assistant.is_user());
    }

    #[test]
    fn test_session_index_defaults_to_empty() {
        let index: SessionIndex = serde_json::from_str("{}").unwrap();
        assert!(index.sessions.is_empty());
    }

    #[test]
    fn test_message_log_roundtrip() {
        let log = MessageLog {
            messages: vec![StoredMessage::user("a"), StoredMessage::assistant("b")],
        };
        let json = serde_json::to_string(&log).unwrap();
        let parsed: MessageLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[0].role, "user");
        assert_eq!(parsed.messages[1].role, "assistant");
    }
}
