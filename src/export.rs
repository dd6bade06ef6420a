//! Conversation transcript export
//!
//! Renders a session's messages to a Markdown transcript on disk. Export
//! is a user-triggered side feature; the caller bumps the export counter
//! in the stats document after a successful write.

use crate::error::{JarvisError, Result};
use crate::storage::StoredMessage;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Write a Markdown transcript of a conversation
///
/// # Arguments
///
/// * `messages` - The conversation to export, in order
/// * `session_id` - Session identifier, used in the header and filename
/// * `dir` - Directory to write the transcript into
///
/// # Returns
///
/// The path of the written transcript
///
/// # Errors
///
/// Returns error if the conversation is empty or the file cannot be written
pub fn export_transcript(
    messages: &[StoredMessage],
    session_id: &str,
    dir: &Path,
) -> Result<PathBuf> {
    if messages.is_empty() {
        return Err(JarvisError::Export("empty conversation".into()).into());
    }

    let path = dir.join(format!(
        "jarvis_{}_{}.md",
        session_id,
        Utc::now().format("%Y%m%d-%H%M%S")
    ));

    let mut transcript = String::new();
    transcript.push_str("# J.A.R.V.I.S conversation\n\n");
    transcript.push_str(&format!("- Session: `{}`\n", session_id));
    transcript.push_str(&format!(
        "- Exported: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for message in messages {
        let speaker = if message.is_user() { "You" } else { "J.A.R.V.I.S" };
        transcript.push_str(&format!(
            "**{}** ({}):\n\n{}\n\n",
            speaker,
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.text
        ));
    }

    std::fs::write(&path, transcript)
        .map_err(|e| JarvisError::Export(format!("Failed to write transcript: {}", e)))?;

    tracing::info!("Exported transcript to {}", path.display());
    Ok(path)
}
