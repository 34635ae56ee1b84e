//! # Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Receipt I/O    │  │  Configuration  │  │     Engine              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Upload         │  │  InvalidConfig  │  │  Core (index misuse,    │ │
//! │  │  NotFound       │  │  InvalidUrl     │  │        bad receipt id)  │ │
//! │  │  Transport      │  │  ConfigLoad/Save│  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate retries. `Upload` and `NotFound` are shown to the
//! user, who re-uploads or re-opens.

use fairshare_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Receipt Service Errors
    // =========================================================================
    /// Upload did not produce a receipt id: transport failure, non-2xx
    /// status, or an unreadable response.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// The receipt service answered a lookup with a non-2xx status.
    #[error("Receipt not found: {id}")]
    NotFound { id: String },

    /// A lookup never got an answer, or the answer was not a receipt.
    #[error("Request failed: {0}")]
    Transport(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<fairshare_core::ValidationError> for ClientError {
    fn from(err: fairshare_core::ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl ClientError {
    /// Errors the user resolves by repeating their action (re-upload,
    /// re-open). Everything else is a setup or programming problem.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            ClientError::Upload(_) | ClientError::NotFound { .. } | ClientError::Transport(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}
