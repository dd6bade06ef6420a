use crate::error::{JarvisError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

pub mod types;
pub use types::{MessageLog, SessionEntry, SessionIndex, Settings, Stats, StoredMessage};

/// File-backed JSON document store
///
/// Holds one directory of flat JSON documents: `settings.json`,
/// `stats.json`, `sessions.json`, and one `messages_{session_id}.json`
/// per session. Reads degrade to defaults on missing or corrupt files;
/// writes are pretty-printed for hand inspection.
pub struct JsonStorage {
    storage_dir: PathBuf,
}

impl JsonStorage {
    /// Create a new storage instance
    ///
    /// Initializes the document directory in the user's data directory.
    pub fn new() -> Result<Self> {
        // Allow override of the storage directory via environment variable.
        // This makes it easy to point the binary at a test directory or an
        // alternate location without changing the user's application data dir.
        if let Ok(override_dir) = std::env::var("JARVIS_STORAGE_DIR") {
            return Self::new_with_dir(override_dir);
        }

        let proj_dirs = ProjectDirs::from("com", "jarvis-chat", "jarvis-chat")
            .ok_or_else(|| JarvisError::Storage("Could not determine data directory".into()))?;

        Self::new_with_dir(proj_dirs.data_dir())
    }

    /// Create a new storage instance rooted at the specified directory.
    ///
    /// This is primarily useful for tests where the default application
    /// data directory is not desirable (for example, using a temporary
    /// directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use jarvis_chat::storage::JsonStorage;
    ///
    /// let storage = JsonStorage::new_with_dir("/tmp/jarvis_test_storage").unwrap();
    /// ```
    pub fn new_with_dir<P: Into<PathBuf>>(storage_dir: P) -> Result<Self> {
        let storage_dir = storage_dir.into();

        std::fs::create_dir_all(&storage_dir)
            .context("Failed to create storage directory")
            .map_err(|e| JarvisError::Storage(e.to_string()))?;

        Ok(Self { storage_dir })
    }

    /// The directory holding the JSON documents
    pub fn dir(&self) -> &PathBuf {
        &self.storage_dir
    }

    fn file_path(&self, filename: &str) -> PathBuf {
        self.storage_dir.join(filename)
    }

    fn messages_filename(session_id: &str) -> String {
        format!("messages_{}.json", session_id)
    }

    /// Read a document, degrading to defaults on any failure
    ///
    /// A missing file is normal (first run); an unreadable or corrupt file
    /// logs a warning. Either way the caller gets a complete document.
    fn read_document<T: DeserializeOwned + Default>(&self, filename: &str) -> T {
        let path = self.file_path(filename);

        if !path.exists() {
            return T::default();
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", filename, e);
                return T::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Error parsing {}: {}", filename, e);
                T::default()
            }
        }
    }

    /// Write a document as pretty-printed JSON
    fn write_document<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        let path = self.file_path(filename);

        let contents = serde_json::to_string_pretty(value)
            .context("Failed to serialize document")
            .map_err(|e| JarvisError::Storage(e.to_string()))?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", filename))
            .map_err(|e| JarvisError::Storage(e.to_string()))?;

        Ok(())
    }

    /// Load settings, merging a partial saved file over defaults
    pub fn load_settings(&self) -> Settings {
        self.read_document("settings.json")
    }

    /// Save settings
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_document("settings.json", settings)
    }

    /// Load usage stats, merging a partial saved file over defaults
    pub fn load_stats(&self) -> Stats {
        self.read_document("stats.json")
    }

    /// Save usage stats
    pub fn save_stats(&self, stats: &Stats) -> Result<()> {
        self.write_document("stats.json", stats)
    }

    /// Load the session index
    pub fn load_sessions(&self) -> Vec<SessionEntry> {
        self.read_document::<SessionIndex>("sessions.json").sessions
    }

    /// Save the session index
    pub fn save_sessions(&self, sessions: &[SessionEntry]) -> Result<()> {
        self.write_document(
            "sessions.json",
            &SessionIndex {
                sessions: sessions.to_vec(),
            },
        )
    }

    /// Update-or-insert a session entry by identifier
    ///
    /// A matching identifier is replaced in place; a new session is
    /// inserted at the front of the index. The index never holds two
    /// entries with the same identifier.
    pub fn upsert_session(&self, session: SessionEntry) -> Result<()> {
        let mut sessions = self.load_sessions();

        match sessions
            .iter_mut()
            .find(|s| s.session_id == session.session_id)
        {
            Some(existing) => *existing = session,
            None => sessions.insert(0, session),
        }

        self.save_sessions(&sessions)
    }

    /// Delete a session entry by identifier
    ///
    /// Removes exactly the matching entries and nothing else. Deleting an
    /// unknown identifier is not an error.
    pub fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.load_sessions();
        sessions.retain(|s| s.session_id != session_id);
        self.save_sessions(&sessions)
    }

    /// Load the message log for a session
    pub fn load_messages(&self, session_id: &str) -> Vec<StoredMessage> {
        self.read_document::<MessageLog>(&Self::messages_filename(session_id))
            .messages
    }

    /// Save the message log for a session
    pub fn save_messages(&self, session_id: &str, messages: &[StoredMessage]) -> Result<()> {
        self.write_document(
            &Self::messages_filename(session_id),
            &MessageLog {
                messages: messages.to_vec(),
            },
        )
    }

    /// Delete the message log file for a session, if present
    ///
    /// The session index and message files carry no referential integrity;
    /// a missing file is not an error.
    pub fn delete_messages(&self, session_id: &str) -> Result<()> {
        let path = self.file_path(&Self::messages_filename(session_id));
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to delete messages for {}", session_id))
                .map_err(|e| JarvisError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Remove every JSON document in the storage directory
    pub fn clear_all(&self) -> Result<()> {
        let entries = std::fs::read_dir(&self.storage_dir)
            .context("Failed to read storage directory")
            .map_err(|e| JarvisError::Storage(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))
                    .map_err(|e| JarvisError::Storage(e.to_string()))?;
            }
        }

        Ok(())
    }
}
