// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat Manager
//!
//! Owns one connection per open chat, reconciles inbound presence/typing/
//! message events into the roster, and tracks the per-chat typing debounce
//! deadlines. All maps are mutated only from this type's methods; the
//! library assumes a single-threaded host loop.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::connection::{ChatConnection, ChatTiming, Reconnect};
use super::error::ChatError;
use super::events::{ChatEvent, EventDispatcher, EventHandler};
use super::frame::ChatFrame;
use super::roster::{Chat, ChatRoster};
use super::transport::{ChatEndpoint, ChatResult, ChatTransport};
use crate::config::ClientConfig;

/// Result of draining one chat's socket.
#[derive(Debug, Default)]
pub struct PumpReport {
    /// Number of frames reconciled.
    pub frames: usize,
    /// When set, the socket dropped abnormally and the host should call
    /// [`ChatManager::reconnect`] after this delay.
    pub reconnect_after: Option<Duration>,
}

/// Maintains live chat connections and the reconciled chat list.
///
/// # Example
///
/// ```ignore
/// use flock_core::chat::{ChatManager, WebSocketTransport};
///
/// let mut manager = ChatManager::new(&config, user_id, token, WebSocketTransport::new);
/// manager.load_roster(chats);
/// manager.open_chat("chat-1")?;
///
/// loop {
///     let report = manager.pump("chat-1", Instant::now())?;
///     manager.expire_typing(Instant::now());
///     // honor report.reconnect_after, render manager.roster()
/// }
/// ```
pub struct ChatManager<T: ChatTransport> {
    local_user_id: String,
    ws_base_url: String,
    token: String,
    timing: ChatTiming,
    connect_timeout_ms: u64,
    io_timeout_ms: u64,
    factory: Box<dyn Fn() -> T + Send>,
    connections: HashMap<String, ChatConnection<T>>,
    typing_deadlines: HashMap<String, Instant>,
    roster: ChatRoster,
    events: EventDispatcher,
}

impl<T: ChatTransport> ChatManager<T> {
    /// Creates a manager for the given user session.
    ///
    /// `factory` builds one transport per opened chat.
    pub fn new<F>(
        config: &ClientConfig,
        local_user_id: impl Into<String>,
        token: impl Into<String>,
        factory: F,
    ) -> Self
    where
        F: Fn() -> T + Send + 'static,
    {
        ChatManager {
            local_user_id: local_user_id.into(),
            ws_base_url: config.ws_base_url.clone(),
            token: token.into(),
            timing: ChatTiming::from_config(config),
            connect_timeout_ms: config.connect_timeout_ms,
            io_timeout_ms: config.io_timeout_ms,
            factory: Box::new(factory),
            connections: HashMap::new(),
            typing_deadlines: HashMap::new(),
            roster: ChatRoster::new(),
            events: EventDispatcher::new(),
        }
    }

    // === Handlers and roster ===

    /// Registers an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.events.add_handler(handler);
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.events.handler_count()
    }

    /// The reconciled chat list, sorted by last-message timestamp descending.
    pub fn roster(&self) -> &ChatRoster {
        &self.roster
    }

    /// Replaces the roster from a REST fetch. Socket events may race this;
    /// last write observed wins.
    pub fn load_roster(&mut self, chats: Vec<Chat>) {
        self.roster.replace_all(chats);
    }

    // === Connection lifecycle ===

    /// Opens the socket for a chat. A second open for the same chat is a
    /// no-op.
    pub fn open_chat(&mut self, chat_id: &str) -> ChatResult<()> {
        if self.connections.contains_key(chat_id) {
            return Ok(());
        }

        let endpoint = self.endpoint(chat_id);
        let mut connection =
            ChatConnection::new((self.factory)(), endpoint, self.timing.clone());
        connection.connect()?;

        let state = connection.state();
        self.connections.insert(chat_id.to_string(), connection);
        self.events.dispatch(ChatEvent::ConnectionStateChanged {
            chat_id: chat_id.to_string(),
            state,
        });
        Ok(())
    }

    /// Closes one chat's socket (code 1000) and drops its typing deadline.
    pub fn close_chat(&mut self, chat_id: &str) {
        if let Some(mut connection) = self.connections.remove(chat_id) {
            connection.close();
            self.typing_deadlines.remove(chat_id);
            self.events.dispatch(ChatEvent::ConnectionStateChanged {
                chat_id: chat_id.to_string(),
                state: connection.state(),
            });
        }
    }

    /// Tears everything down: every socket closed with code 1000, all
    /// timers cleared, all handlers dropped. Called when the chat list
    /// loses focus or the host unmounts.
    pub fn close_all(&mut self) {
        for (_, mut connection) in self.connections.drain() {
            connection.close();
        }
        self.typing_deadlines.clear();
        self.events.clear_handlers();
    }

    /// True when the chat's socket is open.
    pub fn is_connected(&self, chat_id: &str) -> bool {
        self.connections
            .get(chat_id)
            .is_some_and(|c| c.is_connected())
    }

    /// Number of open connections.
    pub fn open_chat_count(&self) -> usize {
        self.connections.len()
    }

    /// Returns the connection for a chat, if open.
    pub fn connection(&self, chat_id: &str) -> Option<&ChatConnection<T>> {
        self.connections.get(chat_id)
    }

    /// Returns the mutable connection for a chat, if open.
    pub fn connection_mut(&mut self, chat_id: &str) -> Option<&mut ChatConnection<T>> {
        self.connections.get_mut(chat_id)
    }

    // === Polling ===

    /// Drains one chat's socket: sends a due ping, receives pending frames,
    /// reconciles them, and reports whether a reconnect should be scheduled.
    pub fn pump(&mut self, chat_id: &str, now: Instant) -> ChatResult<PumpReport> {
        let connection = self
            .connections
            .get_mut(chat_id)
            .ok_or_else(|| ChatError::UnknownChat(chat_id.to_string()))?;

        connection.ping_if_due(now)?;

        let mut frames = Vec::new();
        let mut reconnect_after = None;
        let mut state_change = None;

        loop {
            match connection.receive() {
                Ok(Some(frame)) => frames.push(frame),
                Ok(None) => break,
                Err(ChatError::ConnectionClosed) | Err(ChatError::NotConnected) => {
                    if let Reconnect::RetryAfter(delay) = connection.on_disconnected() {
                        reconnect_after = Some(delay);
                    }
                    state_change = Some(connection.state());
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(state) = state_change {
            self.events.dispatch(ChatEvent::ConnectionStateChanged {
                chat_id: chat_id.to_string(),
                state,
            });
        }

        let count = frames.len();
        for frame in frames {
            self.handle_frame(chat_id, frame, now);
        }

        Ok(PumpReport {
            frames: count,
            reconnect_after,
        })
    }

    /// Re-runs the connect sequence after an abnormal close.
    ///
    /// Returns `Ok(None)` once connected, `Ok(Some(delay))` when the attempt
    /// failed but the budget allows another try, and
    /// [`ChatError::MaxReconnectsExceeded`] when the connection is terminal.
    pub fn reconnect(&mut self, chat_id: &str) -> ChatResult<Option<Duration>> {
        let connection = self
            .connections
            .get_mut(chat_id)
            .ok_or_else(|| ChatError::UnknownChat(chat_id.to_string()))?;

        let result = match connection.reconnect() {
            Ok(()) => Ok(None),
            Err(ChatError::MaxReconnectsExceeded) => Err(ChatError::MaxReconnectsExceeded),
            Err(_) => match connection.on_disconnected() {
                Reconnect::RetryAfter(delay) => Ok(Some(delay)),
                Reconnect::Stop => Err(ChatError::MaxReconnectsExceeded),
            },
        };

        let state = connection.state();
        self.events.dispatch(ChatEvent::ConnectionStateChanged {
            chat_id: chat_id.to_string(),
            state,
        });
        result
    }

    // === Event reconciliation ===

    /// Applies one inbound frame to the roster and typing deadlines.
    ///
    /// Frames echoing the local user are ignored for presence and typing.
    pub fn handle_frame(&mut self, chat_id: &str, frame: ChatFrame, now: Instant) {
        match frame {
            ChatFrame::UserJoined { user_id } | ChatFrame::UserOnline { user_id } => {
                if user_id == self.local_user_id {
                    return;
                }
                if self.roster.set_online(chat_id, true) {
                    self.events.dispatch(ChatEvent::PeerOnline {
                        chat_id: chat_id.to_string(),
                    });
                }
            }

            ChatFrame::UserOffline { user_id } => {
                if user_id == self.local_user_id {
                    return;
                }
                let was_typing = self.roster.set_typing(chat_id, false);
                self.typing_deadlines.remove(chat_id);
                if self.roster.set_online(chat_id, false) {
                    self.events.dispatch(ChatEvent::PeerOffline {
                        chat_id: chat_id.to_string(),
                    });
                }
                if was_typing {
                    self.events.dispatch(ChatEvent::TypingChanged {
                        chat_id: chat_id.to_string(),
                        is_typing: false,
                    });
                }
            }

            ChatFrame::Typing { user_id } => {
                if user_id == self.local_user_id {
                    return;
                }
                let changed = self.roster.set_typing(chat_id, true);
                // Replacing the deadline cancels the previous timer: there
                // is never more than one live timer per chat.
                self.typing_deadlines
                    .insert(chat_id.to_string(), now + self.timing.typing_timeout);
                if changed {
                    self.events.dispatch(ChatEvent::TypingChanged {
                        chat_id: chat_id.to_string(),
                        is_typing: true,
                    });
                }
            }

            ChatFrame::StopTyping { user_id } => {
                if user_id == self.local_user_id {
                    return;
                }
                let changed = self.roster.set_typing(chat_id, false);
                // Cancelling an already-cleared timer is a no-op
                self.typing_deadlines.remove(chat_id);
                if changed {
                    self.events.dispatch(ChatEvent::TypingChanged {
                        chat_id: chat_id.to_string(),
                        is_typing: false,
                    });
                }
            }

            ChatFrame::Message {
                sender_id: Some(sender_id),
                text,
                created_at,
                ..
            } => {
                if sender_id == self.local_user_id {
                    return;
                }
                let at = created_at.unwrap_or_else(unix_millis_now);
                self.typing_deadlines.remove(chat_id);
                if self.roster.record_message(chat_id, &text, at) {
                    self.events.dispatch(ChatEvent::MessageReceived {
                        chat_id: chat_id.to_string(),
                        sender_id,
                        text,
                        sent_at: at,
                    });
                    self.events.dispatch(ChatEvent::RosterReordered);
                }
            }

            ChatFrame::Message { sender_id: None, .. } => {
                log::warn!("dropping message frame without sender_id");
            }

            ChatFrame::Ping => {
                // Server keepalive, nothing to reconcile
            }

            ChatFrame::Unknown => {
                log::warn!("ignoring unknown chat frame type");
            }

            // Read receipts and message edits/deletes are chat-screen
            // concerns; the roster has nothing to reconcile.
            ChatFrame::MarkAsRead { .. }
            | ChatFrame::MarkAllAsRead
            | ChatFrame::DeleteMessage { .. }
            | ChatFrame::EditMessage { .. } => {}
        }
    }

    /// Fires due typing debounce deadlines: each clears the typing flag
    /// exactly once. Returns the affected chat ids.
    pub fn expire_typing(&mut self, now: Instant) -> Vec<String> {
        let due: Vec<String> = self
            .typing_deadlines
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(chat_id, _)| chat_id.clone())
            .collect();

        for chat_id in &due {
            self.typing_deadlines.remove(chat_id);
            if self.roster.set_typing(chat_id, false) {
                self.events.dispatch(ChatEvent::TypingChanged {
                    chat_id: chat_id.clone(),
                    is_typing: false,
                });
            }
        }

        due
    }

    /// Number of pending typing deadlines (at most one per chat).
    pub fn pending_typing_count(&self) -> usize {
        self.typing_deadlines.len()
    }

    // === Outbound operations ===

    /// Sends a text message and moves the chat to the top of the roster.
    /// Returns the client-generated message id.
    pub fn send_text(
        &mut self,
        chat_id: &str,
        text: &str,
        reply_to_id: Option<&str>,
    ) -> ChatResult<String> {
        let connection = self
            .connections
            .get_mut(chat_id)
            .ok_or(ChatError::NotConnected)?;
        let id = connection.send_text(text, reply_to_id)?;

        if self.roster.record_own_message(chat_id, text, unix_millis_now()) {
            self.events.dispatch(ChatEvent::RosterReordered);
        }
        Ok(id)
    }

    /// Signals that the local user is typing.
    pub fn send_typing(&mut self, chat_id: &str) -> ChatResult<()> {
        self.connections
            .get_mut(chat_id)
            .ok_or(ChatError::NotConnected)?
            .send_typing()
    }

    /// Signals that the local user stopped typing.
    pub fn send_stop_typing(&mut self, chat_id: &str) -> ChatResult<()> {
        self.connections
            .get_mut(chat_id)
            .ok_or(ChatError::NotConnected)?
            .send_stop_typing()
    }

    /// Marks one message as read.
    pub fn mark_as_read(&mut self, chat_id: &str, message_id: &str) -> ChatResult<()> {
        self.connections
            .get_mut(chat_id)
            .ok_or(ChatError::NotConnected)?
            .mark_as_read(message_id)
    }

    /// Marks the whole chat as read, locally and on the server.
    pub fn mark_all_as_read(&mut self, chat_id: &str) -> ChatResult<()> {
        self.connections
            .get_mut(chat_id)
            .ok_or(ChatError::NotConnected)?
            .mark_all_as_read()?;
        self.roster.mark_read(chat_id);
        Ok(())
    }

    /// Deletes a message.
    pub fn delete_message(&mut self, chat_id: &str, message_id: &str) -> ChatResult<()> {
        self.connections
            .get_mut(chat_id)
            .ok_or(ChatError::NotConnected)?
            .delete_message(message_id)
    }

    /// Edits a message's text.
    pub fn edit_message(&mut self, chat_id: &str, message_id: &str, text: &str) -> ChatResult<()> {
        self.connections
            .get_mut(chat_id)
            .ok_or(ChatError::NotConnected)?
            .edit_message(message_id, text)
    }

    fn endpoint(&self, chat_id: &str) -> ChatEndpoint {
        ChatEndpoint {
            ws_base_url: self.ws_base_url.clone(),
            chat_id: chat_id.to_string(),
            user_id: self.local_user_id.clone(),
            token: self.token.clone(),
            connect_timeout_ms: self.connect_timeout_ms,
            io_timeout_ms: self.io_timeout_ms,
        }
    }
}

fn unix_millis_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time before UNIX epoch")
        .as_millis() as u64
}
