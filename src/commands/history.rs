//! Chat history management
//!
//! Lists, searches, shows, and deletes saved sessions. The backend is the
//! source of truth when reachable; every read falls back to the local
//! session index so history keeps working offline.

use crate::api::{ApiClient, RemoteSession};
use crate::error::Result;
use crate::storage::{JsonStorage, SessionEntry};
use chrono::{DateTime, Utc};
use colored::Colorize;
use prettytable::{cell, row, Table};

/// Fetch sessions from the backend, falling back to local storage
///
/// The remote list also refreshes the local index so later offline runs
/// see the same sessions (last write wins).
pub async fn fetch_sessions(api: &ApiClient, storage: &JsonStorage) -> Vec<SessionEntry> {
    let remote = api.list_sessions().await;
    if remote.is_empty() {
        tracing::debug!("No remote sessions; using local index");
        return storage.load_sessions();
    }

    let sessions: Vec<SessionEntry> = remote.into_iter().map(SessionEntry::from).collect();
    if let Err(e) = storage.save_sessions(&sessions) {
        tracing::warn!("Failed to refresh local session index: {}", e);
    }
    sessions
}

impl From<RemoteSession> for SessionEntry {
    fn from(remote: RemoteSession) -> Self {
        Self {
            session_id: remote.session_id,
            preview: remote.preview,
            timestamp: remote.timestamp,
        }
    }
}

/// List sessions as a table
pub async fn list(api: &ApiClient, storage: &JsonStorage) -> Result<()> {
    let sessions = fetch_sessions(api, storage).await;
    print_sessions(&sessions);
    Ok(())
}

/// Search sessions by preview text
pub async fn search(api: &ApiClient, storage: &JsonStorage, query: &str) -> Result<()> {
    let sessions = fetch_sessions(api, storage).await;
    let matches = filter_sessions(&sessions, query);
    if matches.is_empty() {
        println!("No sessions matching '{}'", query);
    } else {
        print_sessions(&matches);
    }
    Ok(())
}

/// Show the messages of one session
///
/// Tries the backend history first, then the local message log.
pub async fn show(api: &ApiClient, storage: &JsonStorage, session_id: &str) -> Result<()> {
    let history = api.get_history(session_id).await;

    if !history.messages.is_empty() {
        for message in &history.messages {
            let speaker = if message.is_user() { "You" } else { "J.A.R.V.I.S" };
            println!("{}: {}", speaker.bold(), message.content);
        }
        return Ok(());
    }

    let local = storage.load_messages(session_id);
    if local.is_empty() {
        println!("No messages found for session {}", session_id);
        return Ok(());
    }

    for message in &local {
        let speaker = if message.is_user() { "You" } else { "J.A.R.V.I.S" };
        println!("{}: {}", speaker.bold(), message.text);
    }
    Ok(())
}

/// Delete a session remotely and locally
///
/// The remote delete is best effort; the local index entry is always
/// removed, and the local message log is removed when present.
pub async fn delete(api: &ApiClient, storage: &JsonStorage, session_id: &str) -> Result<()> {
    if !api.delete_session(session_id).await {
        tracing::warn!("Backend did not confirm deletion of {}", session_id);
    }

    storage.delete_session(session_id)?;
    if let Err(e) = storage.delete_messages(session_id) {
        tracing::warn!("Failed to delete messages for {}: {}", session_id, e);
    }

    println!("Deleted session {}", session_id);
    Ok(())
}

/// Filter sessions by case-insensitive substring match on the preview
pub fn filter_sessions(sessions: &[SessionEntry], query: &str) -> Vec<SessionEntry> {
    let query = query.to_lowercase();
    let query = query.trim();
    if query.is_empty() {
        return sessions.to_vec();
    }

    sessions
        .iter()
        .filter(|s| s.preview.to_lowercase().contains(query))
        .cloned()
        .collect()
}

/// Render a session list as a table
pub fn print_sessions(sessions: &[SessionEntry]) {
    if sessions.is_empty() {
        println!("{}", "No chat history yet".dimmed());
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["SESSION", "PREVIEW", "LAST ACTIVITY"]);
    for session in sessions {
        table.add_row(row![
            session.session_id,
            session.preview,
            format_relative_date(session.timestamp)
        ]);
    }
    table.printstd();
}

/// Format a timestamp relative to now
///
/// `Today`, `Yesterday`, `{n} days ago` within a week, the calendar date
/// beyond that, and `Unknown` for a missing timestamp.
pub fn format_relative_date(timestamp: Option<DateTime<Utc>>) -> String {
    let Some(timestamp) = timestamp else {
        return "Unknown".to_string();
    };

    let days = (Utc::now().date_naive() - timestamp.date_naive()).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => timestamp.format("%b %d, %Y").to_string(),
    }
}
