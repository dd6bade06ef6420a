//! Special commands parser for interactive chat mode
//!
//! This module parses and handles special commands that can be entered during
//! interactive chat sessions. Special commands allow users to:
//! - Switch between General and Realtime modes
//! - Toggle voice output on and off
//! - Capture a spoken message
//! - View session status and history
//! - Start a new conversation, export the current one, or exit
//!
//! Commands are prefixed with `/` and are case-insensitive.

use crate::mode::{ChatMode, VoiceOutput};
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands modify the session state or provide information,
/// rather than being sent to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Switch to a different chat mode
    ///
    /// Changes between General (`/chat`) and Realtime (`/chat/realtime`)
    /// endpoint variants for subsequent messages.
    SwitchMode(ChatMode),

    /// Switch voice output on or off
    ///
    /// Controls whether assistant replies are spoken aloud.
    SwitchVoice(VoiceOutput),

    /// Capture one spoken message
    ///
    /// Runs the speech recognizer and sends the recognized text as the
    /// next message.
    Listen,

    /// Display current mode, voice, and session status
    ShowStatus,

    /// List saved chat sessions
    ShowHistory,

    /// Start a new conversation
    ///
    /// Clears the in-memory message list and drops the session id; the
    /// next exchange starts a fresh backend session.
    NewChat,

    /// Export the current conversation as a Markdown transcript
    Export,

    /// Check backend health
    Health,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the assistant as a regular message.
    None,
}

/// Parse a user input string into a special command
///
/// Checks if the input matches any special command pattern.
/// Commands are case-insensitive and may have multiple aliases.
///
/// # Arguments
///
/// * `input` - The user input string to parse
///
/// # Returns
///
/// Returns Ok(SpecialCommand) for valid commands or SpecialCommand::None
/// for non-commands. Returns Err(CommandError) for invalid commands or
/// invalid arguments.
///
/// # Command Examples
///
/// Chat mode switching:
/// - `/mode general` or `/general` - Switch to General mode
/// - `/mode realtime` or `/realtime` - Switch to Realtime mode
///
/// Voice control:
/// - `/voice on` - Speak assistant replies
/// - `/voice off` or `/mute` - Stop speaking replies
/// - `/listen` or `/mic` - Capture one spoken message
///
/// Other commands:
/// - `/status` - Show current mode, voice, and session status
/// - `/history` - List saved sessions
/// - `/new` - Start a new conversation
/// - `/export` - Export the conversation transcript
/// - `/health` - Check backend health
/// - `/help` - Show help information
/// - `exit` or `quit` - Exit the session
///
/// # Examples
///
/// ```
/// use jarvis_chat::commands::special_commands::{parse_special_command, SpecialCommand};
/// use jarvis_chat::mode::{ChatMode, VoiceOutput};
///
/// let cmd = parse_special_command("/mode realtime").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchMode(ChatMode::Realtime));
///
/// let cmd = parse_special_command("/mute").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchVoice(VoiceOutput::Muted));
///
/// let cmd = parse_special_command("hello there").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// // Invalid command returns error
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        // Chat mode switching
        "/mode general" | "/general" => Ok(SpecialCommand::SwitchMode(ChatMode::General)),
        "/mode realtime" | "/realtime" => Ok(SpecialCommand::SwitchMode(ChatMode::Realtime)),

        // Handle /mode with no argument or invalid argument
        "/mode" => Err(CommandError::MissingArgument {
            command: "/mode".to_string(),
            usage: "/mode <general|realtime>".to_string(),
        }),
        input if input.starts_with("/mode ") => {
            let arg = input[6..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/mode".to_string(),
                arg: arg.to_string(),
            })
        }

        // Voice output switching
        "/voice on" => Ok(SpecialCommand::SwitchVoice(VoiceOutput::Enabled)),
        "/voice off" | "/mute" => Ok(SpecialCommand::SwitchVoice(VoiceOutput::Muted)),

        // Handle /voice with no argument or invalid argument
        "/voice" => Err(CommandError::MissingArgument {
            command: "/voice".to_string(),
            usage: "/voice <on|off>".to_string(),
        }),
        input if input.starts_with("/voice ") => {
            let arg = input[7..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/voice".to_string(),
                arg: arg.to_string(),
            })
        }

        // Voice capture
        "/listen" | "/mic" => Ok(SpecialCommand::Listen),

        // Status, history, and session management
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/history" => Ok(SpecialCommand::ShowHistory),
        "/new" => Ok(SpecialCommand::NewChat),
        "/export" => Ok(SpecialCommand::Export),
        "/health" => Ok(SpecialCommand::Health),
        "/help" | "/?" => Ok(SpecialCommand::Help),

        // Session exit
        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        // Unknown command starting with "/"
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Print help information for special commands
pub fn print_help() {
    println!("Available commands:");
    println!("  /mode <general|realtime>  Switch chat mode");
    println!("  /general, /realtime       Shortcuts for mode switching");
    println!("  /voice <on|off>           Toggle spoken replies");
    println!("  /mute                     Shortcut for /voice off");
    println!("  /listen, /mic             Capture one spoken message");
    println!("  /status                   Show mode, voice, and session status");
    println!("  /history                  List saved sessions");
    println!("  /new                      Start a new conversation");
    println!("  /export                   Export the conversation transcript");
    println!("  /health                   Check backend health");
    println!("  /help, /?                 Show this help");
    println!("  exit, quit                Leave the session");
    println!();
}
