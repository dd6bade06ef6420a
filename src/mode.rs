//! Chat mode types and utilities
//!
//! This module defines the different modes for interactive chat:
//! - General mode: messages go to the standard `/chat` endpoint
//! - Realtime mode: messages go to the low-latency `/chat/realtime` variant
//!
//! It also defines the voice-output toggle that controls whether assistant
//! replies are spoken aloud.

use colored::Colorize;
use std::fmt;

/// Chat mode for interactive sessions
///
/// Determines which backend endpoint variant handles an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// General mode: standard request/response chat
    ///
    /// Messages are posted to `/chat` and answered by the default
    /// assistant pipeline.
    General,

    /// Realtime mode: low-latency endpoint variant
    ///
    /// Messages are posted to `/chat/realtime`, trading answer depth
    /// for response speed.
    Realtime,
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "GENERAL"),
            Self::Realtime => write!(f, "REALTIME"),
        }
    }
}

impl ChatMode {
    /// Parse a chat mode from a string
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the mode ("general" or "realtime")
    ///
    /// # Returns
    ///
    /// Returns the parsed ChatMode or an error if the string is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use jarvis_chat::mode::ChatMode;
    ///
    /// let mode = ChatMode::parse_str("general").unwrap();
    /// assert_eq!(mode, ChatMode::General);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "realtime" => Ok(Self::Realtime),
            other => Err(format!("Unknown chat mode: {}", other)),
        }
    }

    /// Get the backend endpoint path for this mode
    ///
    /// # Returns
    ///
    /// The path posted to when sending a message in this mode
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::General => "/chat",
            Self::Realtime => "/chat/realtime",
        }
    }

    /// Get a user-friendly description of this mode
    ///
    /// # Returns
    ///
    /// A description of what the mode does
    pub fn description(&self) -> &'static str {
        match self {
            Self::General => "Standard chat responses",
            Self::Realtime => "Low-latency realtime responses",
        }
    }

    /// Get a colored tag representation of this mode
    ///
    /// # Returns
    ///
    /// A colored string suitable for display in terminal output
    pub fn colored_tag(&self) -> String {
        match self {
            Self::General => format!("[{}]", "GENERAL".green()),
            Self::Realtime => format!("[{}]", "REALTIME".purple()),
        }
    }
}

/// Voice output mode for assistant replies
///
/// Controls whether assistant replies are spoken through the TTS engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceOutput {
    /// Speak assistant replies aloud
    ///
    /// Every assistant reply is handed to the text-to-speech engine
    /// after being printed.
    Enabled,

    /// Print replies only
    ///
    /// Replies are rendered in the terminal without speech output.
    Muted,
}

impl fmt::Display for VoiceOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "VOICE"),
            Self::Muted => write!(f, "MUTED"),
        }
    }
}

impl VoiceOutput {
    /// Parse a voice output mode from a string
    ///
    /// # Arguments
    ///
    /// * `s` - String representation ("on", "tts", "voice", "off", "mute", or "muted")
    ///
    /// # Returns
    ///
    /// Returns the parsed VoiceOutput or an error if the string is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use jarvis_chat::mode::VoiceOutput;
    ///
    /// let mode = VoiceOutput::parse_str("off").unwrap();
    /// assert_eq!(mode, VoiceOutput::Muted);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "on" | "tts" | "voice" | "enabled" => Ok(Self::Enabled),
            "off" | "mute" | "muted" => Ok(Self::Muted),
            other => Err(format!("Unknown voice mode: {}", other)),
        }
    }

    /// Construct from the persisted `tts` settings flag
    pub fn from_setting(tts: bool) -> Self {
        if tts {
            Self::Enabled
        } else {
            Self::Muted
        }
    }

    /// Whether replies should be spoken
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Get a user-friendly description of this voice mode
    ///
    /// # Returns
    ///
    /// A description of what the mode does
    pub fn description(&self) -> &'static str {
        match self {
            Self::Enabled => "Speak assistant replies aloud",
            Self::Muted => "Print replies without speech",
        }
    }

    /// Get a colored tag representation of this voice mode
    ///
    /// # Returns
    ///
    /// A colored string suitable for display in terminal output
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Enabled => format!("[{}]", "VOICE".cyan()),
            Self::Muted => format!("[{}]", "MUTED".yellow()),
        }
    }
}

/// Current chat session state
///
/// Tracks the active chat mode, voice output mode, and the backend session
/// identifier (assigned by the server on the first exchange) during an
/// interactive session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The current chat mode
    pub chat_mode: ChatMode,
    /// The current voice output mode
    pub voice: VoiceOutput,
    /// Backend session identifier, if one has been assigned
    pub session_id: Option<String>,
}

impl SessionState {
    /// Create a new session state
    ///
    /// # Arguments
    ///
    /// * `chat_mode` - The initial chat mode
    /// * `voice` - The initial voice output mode
    ///
    /// # Examples
    ///
    /// ```
    /// use jarvis_chat::mode::{ChatMode, SessionState, VoiceOutput};
    ///
    /// let state = SessionState::new(ChatMode::General, VoiceOutput::Muted);
    /// assert_eq!(state.chat_mode, ChatMode::General);
    /// assert!(state.session_id.is_none());
    /// ```
    pub fn new(chat_mode: ChatMode, voice: VoiceOutput) -> Self {
        Self {
            chat_mode,
            voice,
            session_id: None,
        }
    }

    /// Switch to a new chat mode
    ///
    /// # Arguments
    ///
    /// * `new_mode` - The new chat mode
    ///
    /// # Returns
    ///
    /// The old chat mode that was replaced
    pub fn switch_mode(&mut self, new_mode: ChatMode) -> ChatMode {
        let old_mode = self.chat_mode;
        self.chat_mode = new_mode;
        old_mode
    }

    /// Switch to a new voice output mode
    ///
    /// # Arguments
    ///
    /// * `new_voice` - The new voice output mode
    ///
    /// # Returns
    ///
    /// The old voice output mode that was replaced
    pub fn switch_voice(&mut self, new_voice: VoiceOutput) -> VoiceOutput {
        let old_voice = self.voice;
        self.voice = new_voice;
        old_voice
    }

    /// Format a prompt string with mode indicators
    ///
    /// # Returns
    ///
    /// A formatted prompt string like "[GENERAL][MUTED] >> "
    ///
    /// # Examples
    ///
    /// ```
    /// use jarvis_chat::mode::{ChatMode, SessionState, VoiceOutput};
    ///
    /// let state = SessionState::new(ChatMode::Realtime, VoiceOutput::Enabled);
    /// assert_eq!(state.format_prompt(), "[REALTIME][VOICE] >> ");
    /// ```
    pub fn format_prompt(&self) -> String {
        format!("[{}][{}] >> ", self.chat_mode, self.voice)
    }

    /// Format a prompt string with colored mode indicators
    ///
    /// # Returns
    ///
    /// A formatted prompt string with colored tags
    /// - General: Green, Realtime: Purple
    /// - Voice: Cyan, Muted: Yellow
    pub fn format_colored_prompt(&self) -> String {
        format!(
            "{}{} >> ",
            self.chat_mode.colored_tag(),
            self.voice.colored_tag()
        )
    }

    /// Get the current status as a formatted string
    ///
    /// # Returns
    ///
    /// A multi-line status string
    pub fn status(&self) -> String {
        format!(
            "Mode: {} ({})\nVoice: {} ({})\nSession: {}",
            self.chat_mode,
            self.chat_mode.description(),
            self.voice,
            self.voice.description(),
            self.session_id.as_deref().unwrap_or("none"),
        )
    }
}
