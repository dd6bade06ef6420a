//! jarvis-chat - Terminal chat client library
//!
//! This library provides the core functionality for the jarvis-chat client,
//! including the backend API client, local JSON document storage, the voice
//! capability shim, and the interactive chat session.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: REST client for the assistant backend with canned-fallback replies
//! - `storage`: File-backed JSON documents (settings, stats, sessions, messages)
//! - `voice`: Speech synthesis and capture behind a platform engine trait
//! - `mode`: Chat mode and voice-output toggles with session state
//! - `commands`: Command handlers and the interactive chat loop
//! - `export`: Markdown transcript export
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use jarvis_chat::api::ApiClient;
//! use jarvis_chat::mode::ChatMode;
//! use jarvis_chat::storage::JsonStorage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = JsonStorage::new()?;
//!     let settings = storage.load_settings();
//!
//!     let client = ApiClient::new(&settings.api_url)?;
//!     let reply = client.send_message("Hello!", None, ChatMode::General).await;
//!     println!("{}", reply.response);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod error;
pub mod export;
pub mod mode;
pub mod storage;
pub mod voice;

// Re-export commonly used types
pub use api::ApiClient;
pub use error::{JarvisError, Result};
pub use mode::{ChatMode, SessionState, VoiceOutput};
pub use storage::JsonStorage;
pub use voice::VoiceService;
