//! Error handling for the stock form client
//!
//! None of these reach the form directly: the loader turns them into fallback
//! data and the submission adapter into `false`. They exist for logging and
//! for the short notice shown to staff.

use shared::DocumentError;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Script endpoint is not configured")]
    NotConfigured,

    // Transport errors
    #[error("Request to script endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Script endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    // Response errors
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Script endpoint reported an error: {0}")]
    Rejected(String),

    // Local errors
    #[error("Failed to encode request body: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ClientError {
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::NotConfigured => "NOT_CONFIGURED",
            ClientError::Transport(e) if e.is_timeout() => "TIMEOUT",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Status { .. } => "BAD_STATUS",
            ClientError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ClientError::Rejected(_) => "REJECTED",
            ClientError::Encoding(_) => "ENCODING_ERROR",
            ClientError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Short message for staff; always prompts a retry
    pub fn notice(&self) -> &'static str {
        match self {
            ClientError::NotConfigured => "Running on built-in event data.",
            ClientError::Configuration(_) => "App settings are invalid. Ask a manager.",
            _ => "Failed to save. Check connection.",
        }
    }
}

impl From<DocumentError> for ClientError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Malformed(msg) => ClientError::MalformedResponse(msg),
            DocumentError::Rejected(msg) => ClientError::Rejected(msg),
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
