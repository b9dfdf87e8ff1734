//! Mobile-friendly error types.

use flock_core::{ChatError, FlockError, HttpError, StorageError};

/// Mobile-friendly error type.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MobileError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not connected")]
    NotConnected,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Chat error: {0}")]
    ChatError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MobileError {
    /// User-facing message, following the server's `detail` when present.
    pub fn user_message(&self) -> String {
        match self {
            MobileError::ServerError(detail) => detail.clone(),
            _ => flock_core::http::GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<FlockError> for MobileError {
    fn from(err: FlockError) -> Self {
        match err {
            FlockError::NotAuthenticated => MobileError::NotAuthenticated,
            FlockError::Http(HttpError::Unauthorized) => MobileError::NotAuthenticated,
            FlockError::Http(e @ HttpError::Status { .. }) => {
                MobileError::ServerError(e.user_message())
            }
            FlockError::Http(e) => MobileError::NetworkError(e.to_string()),
            FlockError::Chat(ChatError::NotConnected) => MobileError::NotConnected,
            FlockError::Chat(e) => MobileError::ChatError(e.to_string()),
            FlockError::Storage(e) => MobileError::StorageError(e.to_string()),
            FlockError::Configuration(msg) => MobileError::InvalidInput(msg),
        }
    }
}

impl From<ChatError> for MobileError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotConnected => MobileError::NotConnected,
            other => MobileError::ChatError(other.to_string()),
        }
    }
}

impl From<StorageError> for MobileError {
    fn from(err: StorageError) -> Self {
        MobileError::StorageError(err.to_string())
    }
}
