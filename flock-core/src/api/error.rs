// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for the Flock API layer.

use thiserror::Error;

use crate::chat::ChatError;
use crate::http::{HttpError, GENERIC_ERROR_MESSAGE};
use crate::storage::StorageError;

/// Unified error type for Flock operations.
#[derive(Error, Debug)]
pub enum FlockError {
    /// Token storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// HTTP request failed.
    #[error("http error: {0}")]
    Http(#[from] HttpError),

    /// Chat operation failed.
    #[error("chat error: {0}")]
    Chat(#[from] ChatError),

    /// No user session is established.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FlockError {
    /// Builds the user-facing message: the server's `detail` for HTTP
    /// failures, else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            FlockError::Http(e) => e.user_message(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Result type for Flock operations.
pub type FlockResult<T> = Result<T, FlockError>;
