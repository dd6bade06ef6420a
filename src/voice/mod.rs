//! Voice capability shim
//!
//! Speech synthesis and capture are delegated to an external engine behind
//! the [`SpeechEngine`] trait; exactly one platform engine is selected at
//! startup. Voice is best-effort everywhere: a missing engine or a failed
//! invocation downgrades the feature with a warning instead of failing the
//! session. The only state shared with the chat loop is an atomic
//! `is_listening` flag used to reject re-entrant capture.

use crate::error::{JarvisError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

#[cfg(test)]
use mockall::automock;

/// Capture timeout for one listening attempt (seconds)
const LISTEN_TIMEOUT_SECS: u64 = 15;

/// A platform speech engine
///
/// Implementations drive an external synthesizer/recognizer. Both calls
/// are one-shot: `speak` blocks until the utterance finishes, `listen`
/// captures a single phrase.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speak the given text aloud
    async fn speak(&self, text: &str) -> Result<()>;

    /// Capture one utterance and return the recognized text
    ///
    /// Returns None when nothing intelligible was captured.
    async fn listen(&self) -> Result<Option<String>>;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}

/// Speech engine backed by external commands
///
/// Synthesis invokes `<synth_cmd> <text>`; recognition invokes the
/// recognizer command and reads the recognized phrase from its stdout.
pub struct CommandEngine {
    name: &'static str,
    synth_cmd: Vec<String>,
    recognizer_cmd: Option<Vec<String>>,
}

impl CommandEngine {
    fn new(
        name: &'static str,
        synth_cmd: Vec<String>,
        recognizer_cmd: Option<Vec<String>>,
    ) -> Self {
        Self {
            name,
            synth_cmd,
            recognizer_cmd,
        }
    }
}

#[async_trait]
impl SpeechEngine for CommandEngine {
    async fn speak(&self, text: &str) -> Result<()> {
        let (program, args) = self
            .synth_cmd
            .split_first()
            .ok_or_else(|| JarvisError::Voice("No synthesizer command configured".into()))?;

        let status = Command::new(program)
            .args(args)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| JarvisError::Voice(format!("Failed to run {}: {}", program, e)))?;

        if !status.success() {
            return Err(JarvisError::Voice(format!(
                "Synthesizer {} exited with {}",
                program, status
            ))
            .into());
        }

        Ok(())
    }

    async fn listen(&self) -> Result<Option<String>> {
        let cmd = self
            .recognizer_cmd
            .as_ref()
            .ok_or_else(|| JarvisError::Voice("No recognizer command configured".into()))?;
        let (program, args) = cmd
            .split_first()
            .ok_or_else(|| JarvisError::Voice("Empty recognizer command".into()))?;

        let capture = Command::new(program)
            .args(args)
            .stderr(Stdio::null())
            .output();

        let output = tokio::time::timeout(Duration::from_secs(LISTEN_TIMEOUT_SECS), capture)
            .await
            .map_err(|_| JarvisError::Voice("Speech capture timed out".into()))?
            .map_err(|e| JarvisError::Voice(format!("Failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            return Err(JarvisError::Voice(format!(
                "Recognizer {} exited with {}",
                program, output.status
            ))
            .into());
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Parse a command override from the environment into program + args
fn command_from_env(var: &str) -> Option<Vec<String>> {
    std::env::var(var).ok().and_then(|raw| {
        let parts: Vec<String> = raw.split_whitespace().map(|s| s.to_string()).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts)
        }
    })
}

#[cfg(target_os = "macos")]
const PLATFORM_ENGINE: &str = "say";
#[cfg(not(target_os = "macos"))]
const PLATFORM_ENGINE: &str = "espeak";

/// Create the platform speech engine
///
/// Exactly one engine is built per platform: `say` on macOS, `espeak`
/// elsewhere. The synthesizer and recognizer commands can be overridden
/// with `JARVIS_TTS_COMMAND` and `JARVIS_STT_COMMAND`; without a
/// recognizer override, listening stays unavailable.
pub fn create_platform_engine() -> Option<Box<dyn SpeechEngine>> {
    let synth = command_from_env("JARVIS_TTS_COMMAND")
        .unwrap_or_else(|| vec![PLATFORM_ENGINE.to_string()]);
    let recognizer = command_from_env("JARVIS_STT_COMMAND");

    Some(Box::new(CommandEngine::new(
        PLATFORM_ENGINE,
        synth,
        recognizer,
    )))
}

/// Voice service facade used by the chat loop
///
/// Wraps the platform engine and swallows its failures: `speak` and
/// `listen` log warnings rather than propagating errors, matching the
/// best-effort contract of the voice feature.
pub struct VoiceService {
    engine: Option<Box<dyn SpeechEngine>>,
    is_listening: Arc<AtomicBool>,
}

impl VoiceService {
    /// Create a voice service with the platform engine
    pub fn new() -> Self {
        let engine = create_platform_engine();
        match &engine {
            Some(engine) => tracing::info!("Voice engine initialized: {}", engine.name()),
            None => tracing::warn!("No voice engine available; voice features disabled"),
        }
        Self {
            engine,
            is_listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a voice service with a specific engine (test seam)
    pub fn with_engine(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine: Some(engine),
            is_listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a voice service with no engine
    pub fn disabled() -> Self {
        Self {
            engine: None,
            is_listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an engine is available
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether a capture is currently in flight
    pub fn is_listening(&self) -> bool {
        self.is_listening.load(Ordering::Relaxed)
    }

    /// Speak text aloud, best effort
    pub async fn speak(&self, text: &str) {
        let Some(engine) = &self.engine else {
            return;
        };

        if let Err(e) = engine.speak(text).await {
            tracing::warn!("TTS failed: {}", e);
        }
    }

    /// Capture one utterance, best effort
    ///
    /// Returns None when no engine is available, when a capture is already
    /// in flight, or when nothing intelligible was recognized.
    pub async fn listen(&self) -> Option<String> {
        let Some(engine) = &self.engine else {
            tracing::warn!("Voice input requested but no engine is available");
            return None;
        };

        if self.is_listening.swap(true, Ordering::Relaxed) {
            tracing::warn!("Voice capture already in progress");
            return None;
        }

        let result = engine.listen().await;
        self.is_listening.store(false, Ordering::Relaxed);

        match result {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Speech capture failed: {}", e);
                None
            }
        }
    }
}

impl Default for VoiceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listen_returns_recognized_text() {
        let mut engine = MockSpeechEngine::new();
        engine
            .expect_listen()
            .times(1)
            .returning(|| Ok(Some("turn on the lights".to_string())));

        let service = VoiceService::with_engine(Box::new(engine));
        let text = service.listen().await;
        assert_eq!(text.as_deref(), Some("turn on the lights"));
        assert!(!service.is_listening());
    }

    #[tokio::test]
    async fn test_listen_without_engine_returns_none() {
        let service = VoiceService::disabled();
        assert!(!service.has_engine());
        assert!(service.listen().await.is_none());
    }

    #[tokio::test]
    async fn test_listen_engine_error_is_swallowed() {
        let mut engine = MockSpeechEngine::new();
        engine
            .expect_listen()
            .times(1)
            .returning(|| Err(JarvisError::Voice("mic unavailable".into()).into()));

        let service = VoiceService::with_engine(Box::new(engine));
        assert!(service.listen().await.is_none());
        assert!(!service.is_listening());
    }

    #[tokio::test]
    async fn test_speak_engine_error_is_swallowed() {
        let mut engine = MockSpeechEngine::new();
        engine
            .expect_speak()
            .times(1)
            .returning(|_| Err(JarvisError::Voice("synth crashed".into()).into()));

        let service = VoiceService::with_engine(Box::new(engine));
        // Must not panic or propagate
        service.speak("hello").await;
    }

    /// Engine whose capture takes long enough to observe the guard
    struct SlowEngine;

    #[async_trait]
    impl SpeechEngine for SlowEngine {
        async fn speak(&self, _text: &str) -> Result<()> {
            Ok(())
        }

        async fn listen(&self) -> Result<Option<String>> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Some("first".to_string()))
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_concurrent_listen_is_rejected() {
        let service = Arc::new(VoiceService::with_engine(Box::new(SlowEngine)));
        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.listen().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = service.listen().await;

        assert!(second.is_none());
        assert_eq!(first.await.unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_command_from_env_splits_words() {
        std::env::set_var("JARVIS_TEST_VOICE_CMD", "espeak -v en-us");
        let cmd = command_from_env("JARVIS_TEST_VOICE_CMD").unwrap();
        assert_eq!(cmd, vec!["espeak", "-v", "en-us"]);
        std::env::remove_var("JARVIS_TEST_VOICE_CMD");
    }

    #[test]
    fn test_command_from_env_missing_returns_none() {
        assert!(command_from_env("JARVIS_VOICE_CMD_UNSET").is_none());
    }
}
