// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat error types.

use thiserror::Error;

/// Chat layer error types.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Operation requires an open socket.
    #[error("Not connected")]
    NotConnected,

    /// Connection attempt failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The socket was closed by the peer.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Sending a frame failed.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Receiving a frame failed.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// A frame could not be serialized.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Reconnect attempts are exhausted.
    #[error("Max reconnect attempts exceeded")]
    MaxReconnectsExceeded,

    /// No such chat is open.
    #[error("Unknown chat: {0}")]
    UnknownChat(String),
}
