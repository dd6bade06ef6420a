//! Command-line interface definition for jarvis-chat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, history management,
//! settings, stats, export, and health checks.

use clap::{Parser, Subcommand};

/// jarvis-chat - Terminal chat client for the J.A.R.V.I.S backend
///
/// Talk to the assistant backend from the terminal, with local JSON
/// persistence for settings, stats, and conversation history.
#[derive(Parser, Debug, Clone)]
#[command(name = "jarvis-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override the storage directory for JSON documents
    #[arg(long, env = "JARVIS_STORAGE_DIR")]
    pub storage_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for jarvis-chat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Use the realtime endpoint variant for messages
        #[arg(short, long)]
        realtime: bool,

        /// Resume a previous session by id
        #[arg(long)]
        resume: Option<String>,

        /// Override the backend URL for this session
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Manage chat history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Show or change settings
    Settings {
        /// Settings subcommand
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Show usage statistics
    Stats,

    /// Export a session transcript to the current directory
    Export {
        /// Session id to export
        session_id: String,
    },

    /// Check backend health
    Health,
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List saved sessions
    List,

    /// Show the messages of a session
    Show {
        /// Session id to show
        session_id: String,
    },

    /// Search sessions by preview text
    Search {
        /// Search query
        query: String,
    },

    /// Delete a session
    Delete {
        /// Session id to delete
        session_id: String,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show the merged settings document
    Show,

    /// Set a settings key
    Set {
        /// Settings key (theme, color_scheme, font_size, tts, api_url,
        /// notifications, auto_save)
        key: String,

        /// New value
        value: String,
    },

    /// Clear all stored data (settings, stats, and history)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
