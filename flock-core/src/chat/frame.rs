// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat Wire Frames
//!
//! JSON frames exchanged over a chat socket, discriminated by `type`.
//! The socket is opened per chat, so frames do not carry a chat id.

use serde::{Deserialize, Serialize};

/// A frame on the chat socket.
///
/// Inbound frames fill the server-side fields (`sender_id`, `created_at`);
/// outbound frames leave them unset. Unknown `type` values decode to
/// [`ChatFrame::Unknown`] so new server frames never kill the connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatFrame {
    /// A chat message.
    Message {
        /// Message id. Client-generated for outbound, server id inbound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Sender, set by the server on inbound frames.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender_id: Option<String>,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reply_to_id: Option<String>,
        /// Unix timestamp in milliseconds, set by the server.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        created_at: Option<u64>,
    },

    /// The peer started typing.
    #[serde(alias = "user_typing")]
    Typing { user_id: String },

    /// The peer stopped typing.
    #[serde(alias = "user_stop_typing")]
    StopTyping { user_id: String },

    /// A user joined the chat channel.
    UserJoined { user_id: String },

    /// A user came online.
    UserOnline { user_id: String },

    /// A user went offline.
    UserOffline { user_id: String },

    /// Keepalive.
    Ping,

    /// Mark a single message as read.
    MarkAsRead { message_id: String },

    /// Mark every message in the chat as read.
    MarkAllAsRead,

    /// Delete a message.
    DeleteMessage { message_id: String },

    /// Edit a message's text.
    EditMessage { message_id: String, text: String },

    /// Any frame type this client does not know. Logged and ignored.
    #[serde(other)]
    Unknown,
}

impl ChatFrame {
    /// Builds an outbound message frame with a fresh client-side id.
    pub fn outbound_message(text: &str, reply_to_id: Option<&str>) -> Self {
        ChatFrame::Message {
            id: Some(uuid::Uuid::new_v4().to_string()),
            sender_id: None,
            text: text.to_string(),
            reply_to_id: reply_to_id.map(|s| s.to_string()),
            created_at: None,
        }
    }
}
