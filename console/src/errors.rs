//! Custom error types for the console backend
//!
//! Provides structured error handling with context for the failure scenarios
//! the console distinguishes: request rejections from the daemon, transport
//! failures, and invalid input handed to the registries.

use std::fmt;

/// Main error type for the console
#[derive(Debug)]
pub enum ConsoleError {
    /// Configuration-related errors
    Config(ConfigError),

    /// The daemon rejected a request (non-2xx status or an error envelope)
    Api { status: u16, message: String },

    /// The request never produced a daemon response
    Transport { url: String, reason: String },

    /// Caller handed us something unusable (empty operation id, unknown action)
    InvalidInput { field: String, reason: String },

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

impl ConsoleError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        ConsoleError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Human readable message without the category prefix, used as the
    /// appended text of failure notifications.
    pub fn message(&self) -> String {
        match self {
            ConsoleError::Api { message, .. } => message.clone(),
            ConsoleError::Transport { reason, .. } => reason.clone(),
            ConsoleError::InvalidInput { reason, .. } => reason.clone(),
            ConsoleError::Config(e) => e.to_string(),
            ConsoleError::Other(msg) => msg.clone(),
        }
    }

    /// HTTP status reported by the daemon, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Config(e) => write!(f, "Configuration error: {}", e),
            ConsoleError::Api { status, message } => {
                write!(f, "Daemon returned {}: {}", status, message)
            }
            ConsoleError::Transport { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
            ConsoleError::InvalidInput { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConsoleError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConsoleError {}
impl std::error::Error for ConfigError {}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Other(err.to_string())
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(err: ConfigError) -> Self {
        ConsoleError::Config(err)
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ConsoleError::Transport {
            url,
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Other(format!("Invalid JSON from daemon: {}", err))
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Anything that can contribute a message to a failure notification or a
/// rejected bulk entry.
pub trait ErrorMessage {
    fn error_message(&self) -> String;
}

impl ErrorMessage for ConsoleError {
    fn error_message(&self) -> String {
        self.message()
    }
}

impl ErrorMessage for anyhow::Error {
    fn error_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorMessage for str {
    fn error_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorMessage for String {
    fn error_message(&self) -> String {
        self.clone()
    }
}
