// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chats REST Client
//!
//! Chat list bootstrap and message history against `/chat`. Live updates
//! arrive over the socket; this client only covers the request/response
//! surface.

use serde_json::json;

use super::error::FlockResult;
use super::models::{parse_list, ChatMessage};
use crate::chat::Chat;
use crate::http::{ApiClient, HttpRequest, HttpTransport};
use crate::storage::SecureStore;

/// Client for the `/chat` resource group.
pub struct ChatApiClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
}

impl<'a, S: SecureStore, T: HttpTransport> ChatApiClient<'a, S, T> {
    /// Creates a new ChatApiClient.
    pub fn new(http: &'a ApiClient<S, T>) -> Self {
        ChatApiClient { http }
    }

    /// The user's chats. Feed this into
    /// [`ChatManager::load_roster`](crate::chat::ChatManager::load_roster).
    pub fn list_chats(&self) -> FlockResult<Vec<Chat>> {
        let response = self.http.get("/chat")?;
        Ok(parse_list(response.value()?, "chats"))
    }

    /// Opens (or returns the existing) chat with a peer.
    pub fn create_chat(&self, peer_id: &str) -> FlockResult<Chat> {
        let response = self
            .http
            .post("/chat", json!({ "peer_id": peer_id }))?;
        Ok(response.json()?)
    }

    /// One page of a chat's message history, newest first.
    pub fn messages(&self, chat_id: &str, limit: u32, offset: u32) -> FlockResult<Vec<ChatMessage>> {
        let response = self.http.request(
            HttpRequest::get(&format!("/chat/{}/messages", chat_id))
                .query("limit", limit)
                .query("offset", offset),
        )?;
        Ok(parse_list(response.value()?, "chat messages"))
    }

    /// Deletes a chat.
    pub fn delete_chat(&self, chat_id: &str) -> FlockResult<()> {
        self.http.delete(&format!("/chat/{}", chat_id))?;
        Ok(())
    }
}
