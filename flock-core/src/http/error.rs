// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Fallback shown to the user when the server gives no `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// HTTP layer error types.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status from the server.
    #[error("HTTP {status}")]
    Status {
        status: u16,
        /// Server-supplied `detail` field, when present.
        detail: Option<String>,
    },

    /// Authentication failed and could not be recovered by a refresh.
    #[error("Not authenticated")]
    Unauthorized,

    /// Response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Token store access failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl HttpError {
    /// Builds the user-facing message: the server's `detail` when present,
    /// else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            HttpError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = HttpError::Status {
            status: 403,
            detail: Some("You cannot edit this post".into()),
        };
        assert_eq!(err.user_message(), "You cannot edit this post");
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let err = HttpError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);

        let err = HttpError::Network("connection reset".into());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
