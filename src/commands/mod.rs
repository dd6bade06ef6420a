/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes the top-level command modules:

- `chat`     — Interactive chat session
- `history`  — List, search, show, and delete saved sessions
- `settings` — Show and mutate the settings document
- `stats`    — Usage statistics summary
- `health`   — Backend health probe
- `export`   — Transcript export

These handlers are intentionally small and use the library components:
the API client, the JSON store, and the voice shim.
*/

use crate::api::ApiClient;
use crate::error::Result;
use crate::mode::{ChatMode, SessionState, VoiceOutput};
use crate::storage::{JsonStorage, SessionEntry, StoredMessage};
use crate::voice::VoiceService;
use chrono::Utc;
use colored::Colorize;

// Chat history management
pub mod history;

// Settings command handlers
pub mod settings;

// Special commands parser for the interactive session
pub mod special_commands;

/// Maximum preview length stored in the session index (characters)
const PREVIEW_MAX_CHARS: usize = 60;

/// Build the session index preview from a conversation
///
/// Uses the first user message, truncated; a conversation with no user
/// turn yet gets a placeholder.
pub fn session_preview(messages: &[StoredMessage]) -> String {
    messages
        .iter()
        .find(|m| m.is_user())
        .map(|m| truncate_preview(&m.text))
        .unwrap_or_else(|| "New conversation".to_string())
}

fn truncate_preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{}...", truncated.trim_end())
    }
}

/// Interactive chat session state and side effects
///
/// Owns the API client, the document store, the voice shim, and the
/// in-memory conversation. The readline loop in [`chat::run_chat`] drives
/// one exchange at a time; every completed exchange updates the stats
/// document and, when auto-save is on, the session index and message log.
pub struct ChatSession {
    pub api: ApiClient,
    pub storage: JsonStorage,
    pub voice: VoiceService,
    pub state: SessionState,
    pub messages: Vec<StoredMessage>,
    auto_save: bool,
}

impl ChatSession {
    /// Create a session from loaded settings
    pub fn new(api: ApiClient, storage: JsonStorage, voice: VoiceService, mode: ChatMode) -> Self {
        let settings = storage.load_settings();
        let state = SessionState::new(mode, VoiceOutput::from_setting(settings.tts));
        Self {
            api,
            storage,
            voice,
            state,
            messages: Vec::new(),
            auto_save: settings.auto_save,
        }
    }

    /// Run one exchange: send the message, render and record the reply
    ///
    /// The send never fails (failures surface as canned replies), so this
    /// only errors when a storage write does. The loop logs and swallows
    /// even those.
    pub async fn run_exchange(&mut self, text: &str) -> Result<()> {
        self.messages.push(StoredMessage::user(text));

        let reply = self
            .api
            .send_message(text, self.state.session_id.as_deref(), self.state.chat_mode)
            .await;

        if let Some(id) = &reply.session_id {
            self.state.session_id = Some(id.clone());
        }

        println!("{} {}\n", "J.A.R.V.I.S:".cyan().bold(), reply.response);
        self.messages.push(StoredMessage::assistant(&reply.response));

        if self.state.voice.is_enabled() {
            self.voice.speak(&reply.response).await;
        }

        // Both turns count
        let mut stats = self.storage.load_stats();
        stats.total_messages += 2;
        if let Err(e) = self.storage.save_stats(&stats) {
            tracing::warn!("Failed to save stats: {}", e);
        }

        if self.auto_save {
            self.persist();
        }

        Ok(())
    }

    /// Persist the session index entry and message log
    pub fn persist(&self) {
        let Some(session_id) = &self.state.session_id else {
            return;
        };

        let entry = SessionEntry {
            session_id: session_id.clone(),
            preview: session_preview(&self.messages),
            timestamp: Some(Utc::now()),
        };
        if let Err(e) = self.storage.upsert_session(entry) {
            tracing::warn!("Failed to save session index: {}", e);
        }
        if let Err(e) = self.storage.save_messages(session_id, &self.messages) {
            tracing::warn!("Failed to save messages: {}", e);
        }
    }

    /// Load a previous session into the conversation
    ///
    /// Fetches the backend history first; an unreachable backend falls
    /// back to the local message log. Replaces the in-memory list.
    pub async fn load_session(&mut self, session_id: &str) {
        let history = self.api.get_history(session_id).await;

        self.messages = if history.messages.is_empty() {
            tracing::debug!("No remote history for {}; using local log", session_id);
            self.storage.load_messages(session_id)
        } else {
            history
                .messages
                .into_iter()
                .map(|m| StoredMessage {
                    role: m.role,
                    text: m.content,
                    timestamp: Utc::now(),
                })
                .collect()
        };

        self.state.session_id = Some(session_id.to_string());
    }

    /// Reset to a fresh conversation
    pub fn new_chat(&mut self) {
        self.state.session_id = None;
        self.messages.clear();
    }

    /// Render the loaded conversation (used after resuming)
    pub fn print_messages(&self) {
        for message in &self.messages {
            if message.is_user() {
                println!("{} {}", "You:".green().bold(), message.text);
            } else {
                println!("{} {}", "J.A.R.V.I.S:".cyan().bold(), message.text);
            }
        }
        if !self.messages.is_empty() {
            println!();
        }
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Instantiates the API client and voice shim, then runs a
    //! readline-based interactive loop that submits user input to the
    //! assistant backend. Special commands (mode/voice switching, status,
    //! history, export) are handled locally before anything is sent.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive chat session
    ///
    /// # Arguments
    ///
    /// * `storage` - Document store (consumed by the session)
    /// * `realtime` - Start in Realtime mode instead of General
    /// * `resume` - Session id to resume
    /// * `url_override` - Backend URL override for this session
    pub async fn run_chat(
        storage: JsonStorage,
        realtime: bool,
        resume: Option<String>,
        url_override: Option<String>,
    ) -> Result<()> {
        tracing::info!("Starting interactive chat session");

        let settings = storage.load_settings();
        let base_url = url_override.unwrap_or_else(|| settings.api_url.clone());
        let api = ApiClient::new(base_url)?;
        let voice = VoiceService::new();

        let mode = if realtime {
            ChatMode::Realtime
        } else {
            ChatMode::General
        };
        let mut session = ChatSession::new(api, storage, voice, mode);

        // Stamp the login and maintain the streak before the first exchange
        let mut stats = session.storage.load_stats();
        stats.record_login(Utc::now());
        if let Err(e) = session.storage.save_stats(&stats) {
            tracing::warn!("Failed to save stats: {}", e);
        }

        if let Some(session_id) = resume {
            session.load_session(&session_id).await;
            session.print_messages();
        }

        let mut rl = DefaultEditor::new()?;
        print_welcome_banner(&session.state);

        loop {
            let prompt = session.state.format_colored_prompt();
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    // Check for special commands first
                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::SwitchMode(new_mode) => {
                            let old_mode = session.state.switch_mode(new_mode);
                            println!("Switched from {} to {} mode\n", old_mode, new_mode);
                        }
                        SpecialCommand::SwitchVoice(new_voice) => {
                            let old_voice = session.state.switch_voice(new_voice);
                            println!("Switched from {} to {}\n", old_voice, new_voice);
                        }
                        SpecialCommand::Listen => {
                            if !session.voice.has_engine() {
                                println!("{}\n", "No voice engine available".yellow());
                                continue;
                            }
                            println!("{}", "Listening...".cyan());
                            match session.voice.listen().await {
                                Some(text) => {
                                    println!("{} {}", "You (voice):".green().bold(), text);
                                    if let Err(e) = session.run_exchange(&text).await {
                                        tracing::warn!("Exchange failed: {}", e);
                                    }
                                }
                                None => println!("{}\n", "Nothing captured".yellow()),
                            }
                        }
                        SpecialCommand::ShowStatus => {
                            print_status_display(&session.state, session.messages.len());
                        }
                        SpecialCommand::ShowHistory => {
                            let sessions =
                                history::fetch_sessions(&session.api, &session.storage).await;
                            history::print_sessions(&sessions);
                        }
                        SpecialCommand::NewChat => {
                            session.new_chat();
                            println!("Started a new conversation\n");
                        }
                        SpecialCommand::Export => {
                            export_current(&session);
                        }
                        SpecialCommand::Health => {
                            print_health(&session.api).await;
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            if let Err(e) = session.run_exchange(trimmed).await {
                                tracing::warn!("Exchange failed: {}", e);
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }

        // Persist state on the way out, mirroring the voice toggle back
        // into the settings document
        let mut settings = session.storage.load_settings();
        settings.tts = session.state.voice.is_enabled();
        if let Err(e) = session.storage.save_settings(&settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
        session.persist();

        println!("Goodbye.");
        Ok(())
    }

    fn print_welcome_banner(state: &SessionState) {
        println!("{}", "J.A.R.V.I.S".cyan().bold());
        println!(
            "Mode: {}  Voice: {}  ({} for commands)\n",
            state.chat_mode,
            state.voice,
            "/help".dimmed()
        );
    }

    fn print_status_display(state: &SessionState, message_count: usize) {
        println!("{}", state.status());
        println!("Messages in conversation: {}\n", message_count);
    }

    fn export_current(session: &ChatSession) {
        let session_id = session
            .state
            .session_id
            .clone()
            .unwrap_or_else(|| "unsaved".to_string());

        let cwd = match std::env::current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                println!("{}\n", format!("Export failed: {}", e).red());
                return;
            }
        };

        match crate::export::export_transcript(&session.messages, &session_id, &cwd) {
            Ok(path) => {
                println!("Exported transcript to {}\n", path.display());
                let mut stats = session.storage.load_stats();
                stats.exported_count += 1;
                if let Err(e) = session.storage.save_stats(&stats) {
                    tracing::warn!("Failed to save stats: {}", e);
                }
            }
            Err(e) => println!("{}\n", format!("Export failed: {}", e).red()),
        }
    }
}

// Usage statistics summary
pub mod stats {
    use super::*;

    /// Print the usage statistics summary
    pub fn show(storage: &JsonStorage) {
        let stats = storage.load_stats();
        println!("{}", stats.user_name.bold());
        println!("Level {} Assistant Master", stats.level());
        println!("  Messages exchanged: {}", stats.total_messages);
        println!("  Transcripts exported: {}", stats.exported_count);
        println!("  Login streak: {} day(s)", stats.streak);
        match stats.last_login {
            Some(last) => println!("  Last login: {}", last.format("%Y-%m-%d %H:%M UTC")),
            None => println!("  Last login: never"),
        }
    }
}

// Backend health probe
pub mod health {
    use super::*;

    /// Check backend health and print the result
    pub async fn run(api: &ApiClient) {
        print_health(api).await;
    }
}

/// Print the backend health status
pub(crate) async fn print_health(api: &ApiClient) {
    let status = api.health_check().await;
    if status.is_healthy() {
        println!("Backend is {} ({})", "healthy".green(), status.status);
    } else {
        println!(
            "Backend is {}: {}",
            "unreachable".red(),
            status.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }
}

// Transcript export for a saved session
pub mod export {
    use super::*;

    /// Export a saved session's transcript to the current directory
    ///
    /// Loads the local message log (falling back to the backend history
    /// when the log is missing), writes the transcript, and bumps the
    /// export counter.
    pub async fn run(api: &ApiClient, storage: &JsonStorage, session_id: &str) -> Result<()> {
        let mut messages = storage.load_messages(session_id);

        if messages.is_empty() {
            let history = api.get_history(session_id).await;
            messages = history
                .messages
                .into_iter()
                .map(|m| StoredMessage {
                    role: m.role,
                    text: m.content,
                    timestamp: Utc::now(),
                })
                .collect();
        }

        let cwd = std::env::current_dir()?;
        let path = crate::export::export_transcript(&messages, session_id, &cwd)?;
        println!("Exported transcript to {}", path.display());

        let mut stats = storage.load_stats();
        stats.exported_count += 1;
        storage.save_stats(&stats)?;
        Ok(())
    }
}
