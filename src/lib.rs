//! QUIZTERM - terminal quiz
//!
//! A TUI multiple-choice quiz: a fixed question bank, one question at a
//! time, a timed reveal between questions and a banded result screen.

use std::fmt;

pub mod app;
pub mod audio;
pub mod config;
pub mod logging;
pub mod quiz;

// Common error types
#[derive(Debug)]
pub enum QuizError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Question file could not be decoded
    PersistenceError(String),
    /// Question bank content violates its invariants
    InvalidContent(String),
    /// Answer index outside the current question's answers
    InvalidAnswer { index: usize, available: usize },
    /// Audio backend failure
    AudioError(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IoError(err) => write!(f, "I/O error: {}", err),
            QuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::PersistenceError(msg) => write!(f, "Question file error: {}", msg),
            QuizError::InvalidContent(msg) => write!(f, "Invalid quiz content: {}", msg),
            QuizError::InvalidAnswer { index, available } => write!(
                f,
                "Answer index {} out of range ({} answers available)",
                index, available
            ),
            QuizError::AudioError(msg) => write!(f, "Audio error: {}", msg),
            QuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::IoError(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::PersistenceError(format!("JSON parsing error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

/// Result type alias for quiz operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::InvalidContent(msg) => {
                format!("The question bank is invalid ({}). Fix the question file and try again.", msg)
            }
            QuizError::PersistenceError(_) => {
                "The question file could not be read. Check that it is a JSON list of {text, answers, correctIndex}."
                    .to_string()
            }
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            QuizError::AudioError(_) => {
                "Background audio could not be started. Check the configured player command."
                    .to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "quizterm";
pub const CONFIG_FILE: &str = "quizterm.toml";
pub const LOG_ENV_VAR: &str = "QUIZTERM_LOG";
