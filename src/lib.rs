//! EXAM-IVR - terminal exam interface
//!
//! Presents a fixed sequence of questions one at a time with IVR-style
//! numbered controls, a simulated dictation mode, spoken read-back of
//! questions, a countdown timer and a simulated submission.

use std::fmt;

pub mod app;
pub mod config;
pub mod exam;
pub mod speech;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum ExamError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Question set could not be loaded or is invalid
    QuestionSetError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// No view is mounted at the requested path
    RouteNotFound(String),
    /// Speech backend could not be started
    SpeechError(String),
}

impl fmt::Display for ExamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamError::IoError(err) => write!(f, "I/O error: {}", err),
            ExamError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ExamError::QuestionSetError(msg) => write!(f, "Question set error: {}", msg),
            ExamError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            ExamError::RouteNotFound(path) => write!(f, "No view mounted at path: {}", path),
            ExamError::SpeechError(msg) => write!(f, "Speech error: {}", msg),
        }
    }
}

impl std::error::Error for ExamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExamError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExamError {
    fn from(err: std::io::Error) -> Self {
        ExamError::IoError(err)
    }
}

impl From<serde_json::Error> for ExamError {
    fn from(err: serde_json::Error) -> Self {
        ExamError::QuestionSetError(format!("JSON parsing error: {}", err))
    }
}

impl From<toml::de::Error> for ExamError {
    fn from(err: toml::de::Error) -> Self {
        ExamError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for ExamError {
    fn from(err: toml::ser::Error) -> Self {
        ExamError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for exam operations
pub type Result<T> = std::result::Result<T, ExamError>;

/// Error handling utilities
pub mod error {
    use super::ExamError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &ExamError) -> String {
        match error {
            ExamError::ConfigError(msg) => {
                format!("Configuration error: {}. Check exam.toml.", msg)
            }
            ExamError::QuestionSetError(msg) => format!(
                "Could not load questions: {}. Check questions_file in exam.toml.",
                msg
            ),
            ExamError::RouteNotFound(path) => format!(
                "Nothing is mounted at '{}'. Try '/' or '/exam'.",
                path
            ),
            ExamError::TuiError(_) => {
                "The terminal could not be set up. Run from an interactive terminal.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "exam-ivr";
pub const CONFIG_FILE: &str = "exam.toml";

/// Log file name, under the cache directory
pub const LOG_FILE: &str = "exam-ivr.log";
/// Default exam length in seconds
pub const EXAM_DURATION_SECS: u32 = 5 * 60;
/// Default artificial submission delay in milliseconds
pub const SUBMIT_DELAY_MS: u64 = 2000;
/// Default delay before the answer field takes focus in milliseconds
pub const FOCUS_DELAY_MS: u64 = 100;
