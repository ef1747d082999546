//! Error types for the Gmail search tool.

use thiserror::Error;

/// Errors that can occur while loading, searching or extracting messages.
#[derive(Debug, Error)]
pub enum GmailSearchError {
    /// Base error for the Gmail search tool.
    #[error("[GmailSearch Error]: {message}")]
    Base {
        /// Error message
        message: String,
    },

    /// Error occurred when reading a message file or directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error occurred when parsing JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoded body data is not valid base64url.
    #[error("Invalid body encoding: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The message part tree could not be accepted.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// No message with the given id exists in the source.
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl GmailSearchError {
    /// Creates a new Base error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Base {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for GmailSearchError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result type for Gmail search operations.
pub type Result<T> = std::result::Result<T, GmailSearchError>;
