//! Error types for jarvis-chat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for jarvis-chat operations
///
/// This enum encompasses all possible errors that can occur while talking
/// to the assistant backend, reading and writing local JSON documents,
/// driving the voice engines, and exporting transcripts.
#[derive(Error, Debug)]
pub enum JarvisError {
    /// Configuration-related errors (invalid settings values, bad URLs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API errors (unexpected response shapes, bad status codes)
    #[error("API error: {0}")]
    Api(String),

    /// Local storage errors (document read/write failures)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Voice engine errors (speech synthesis or capture failures)
    #[error("Voice error: {0}")]
    Voice(String),

    /// Transcript export errors
    #[error("Export error: {0}")]
    Export(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for jarvis-chat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
