// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat Roster
//!
//! The chat list and its single invariant: always sorted by last-message
//! timestamp descending. Every mutation that changes `last_message_at`
//! re-sorts.

use serde::{Deserialize, Serialize};

/// A chat as shown in the chat list.
///
/// Populated by the initial REST fetch and mutated by inbound socket events
/// (presence, typing, new messages). Concurrent REST and socket updates are
/// last-write-wins; there are no version numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub peer_id: String,
    pub peer_username: String,
    #[serde(default)]
    pub peer_avatar: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    /// Unix timestamp in milliseconds of the newest message.
    #[serde(default)]
    pub last_message_at: Option<u64>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default = "default_read")]
    pub is_read: bool,
    /// Presence; socket-driven, not part of the REST payload.
    #[serde(default)]
    pub is_online: bool,
    /// Typing indicator; socket-driven, not part of the REST payload.
    #[serde(default)]
    pub is_typing: bool,
    /// Unix timestamp in milliseconds of chat creation.
    pub created_at: u64,
}

fn default_read() -> bool {
    true
}

impl Chat {
    /// Sort key: newest message first, creation time for empty chats.
    fn sort_key(&self) -> u64 {
        self.last_message_at.unwrap_or(self.created_at)
    }
}

/// The ordered chat list.
///
/// # Example
///
/// ```ignore
/// use flock_core::chat::ChatRoster;
///
/// let mut roster = ChatRoster::new();
/// roster.replace_all(chats);
/// roster.record_message("chat-1", "hello", 1_700_000_000_000);
/// assert_eq!(roster.chats()[0].id, "chat-1");
/// ```
#[derive(Debug, Default)]
pub struct ChatRoster {
    chats: Vec<Chat>,
}

impl ChatRoster {
    pub fn new() -> Self {
        ChatRoster { chats: Vec::new() }
    }

    /// Replaces the whole list (initial REST fetch) and sorts it.
    pub fn replace_all(&mut self, chats: Vec<Chat>) {
        self.chats = chats;
        self.sort();
    }

    /// Inserts or replaces a chat by id, then re-sorts.
    pub fn upsert(&mut self, chat: Chat) {
        match self.chats.iter_mut().find(|c| c.id == chat.id) {
            Some(existing) => *existing = chat,
            None => self.chats.push(chat),
        }
        self.sort();
    }

    /// Removes a chat. Returns whether it was present.
    pub fn remove(&mut self, chat_id: &str) -> bool {
        let before = self.chats.len();
        self.chats.retain(|c| c.id != chat_id);
        self.chats.len() != before
    }

    /// The chats, sorted by last-message timestamp descending.
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn get(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == chat_id)
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// Sets the peer's online flag. Returns whether the chat exists.
    pub fn set_online(&mut self, chat_id: &str, online: bool) -> bool {
        self.with_chat(chat_id, |chat| chat.is_online = online)
    }

    /// Sets the typing flag. Returns whether the flag actually changed.
    pub fn set_typing(&mut self, chat_id: &str, typing: bool) -> bool {
        let mut changed = false;
        self.with_chat(chat_id, |chat| {
            changed = chat.is_typing != typing;
            chat.is_typing = typing;
        });
        changed
    }

    /// Records a new message: last message text/timestamp updated, unread
    /// count bumped, typing cleared, list re-sorted.
    ///
    /// Returns whether the chat exists.
    pub fn record_message(&mut self, chat_id: &str, text: &str, at: u64) -> bool {
        let found = self.with_chat(chat_id, |chat| {
            chat.last_message = Some(text.to_string());
            chat.last_message_at = Some(at);
            chat.unread_count += 1;
            chat.is_read = false;
            chat.is_typing = false;
        });
        if found {
            self.sort();
        }
        found
    }

    /// Records a message sent by the local user: moves the chat up without
    /// touching the unread count.
    pub fn record_own_message(&mut self, chat_id: &str, text: &str, at: u64) -> bool {
        let found = self.with_chat(chat_id, |chat| {
            chat.last_message = Some(text.to_string());
            chat.last_message_at = Some(at);
        });
        if found {
            self.sort();
        }
        found
    }

    /// Clears the unread state after the local user viewed the chat.
    pub fn mark_read(&mut self, chat_id: &str) -> bool {
        self.with_chat(chat_id, |chat| {
            chat.unread_count = 0;
            chat.is_read = true;
        })
    }

    /// Stable sort by last-message timestamp descending. Ties keep their
    /// existing relative order.
    fn sort(&mut self) {
        self.chats
            .sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    }

    fn with_chat(&mut self, chat_id: &str, f: impl FnOnce(&mut Chat)) -> bool {
        match self.chats.iter_mut().find(|c| c.id == chat_id) {
            Some(chat) => {
                f(chat);
                true
            }
            None => false,
        }
    }
}
