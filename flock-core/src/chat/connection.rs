// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat Connection
//!
//! Per-chat connection lifecycle: ping keepalive, bounded reconnection on
//! abnormal closes, and clean teardown.

use std::time::{Duration, Instant};

use super::error::ChatError;
use super::frame::ChatFrame;
use super::transport::{ChatEndpoint, ChatResult, ChatTransport, ConnectionState, CLOSE_NORMAL};
use crate::config::ClientConfig;

/// Timing knobs shared by connections and the manager.
#[derive(Debug, Clone)]
pub struct ChatTiming {
    /// Interval between outbound ping frames while the socket is open.
    pub ping_interval: Duration,
    /// Window after which an unrefreshed typing indicator auto-clears.
    pub typing_timeout: Duration,
    /// Fixed delay between reconnect attempts.
    pub reconnect_delay: Duration,
    /// Maximum reconnect attempts after an abnormal close.
    pub max_reconnect_attempts: u32,
}

impl ChatTiming {
    /// Extracts the chat timing knobs from the client config.
    pub fn from_config(config: &ClientConfig) -> Self {
        ChatTiming {
            ping_interval: Duration::from_millis(config.ping_interval_ms),
            typing_timeout: Duration::from_millis(config.typing_timeout_ms),
            reconnect_delay: Duration::from_millis(config.reconnect_delay_ms),
            max_reconnect_attempts: config.max_reconnect_attempts,
        }
    }
}

impl Default for ChatTiming {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// Decision after a socket loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconnect {
    /// Retry the full connect sequence after this delay. The library never
    /// sleeps; the host loop owns the delay.
    RetryAfter(Duration),
    /// The connection is terminal: intentional close or attempts exhausted.
    Stop,
}

/// A single chat's connection.
///
/// State machine: Connecting → Connected on open (attempt counter reset,
/// ping armed). An abnormal close (code ≠ 1000) yields
/// [`Reconnect::RetryAfter`] until the attempt budget is spent; a clean
/// close (code 1000) or `close()` is terminal.
///
/// # Example
///
/// ```ignore
/// use flock_core::chat::{ChatConnection, MockChatTransport};
///
/// let mut conn = ChatConnection::new(MockChatTransport::new(), endpoint, timing);
/// conn.connect()?;
/// conn.send_typing()?;
/// conn.close();
/// ```
pub struct ChatConnection<T: ChatTransport> {
    transport: T,
    endpoint: ChatEndpoint,
    timing: ChatTiming,
    reconnect_attempt: u32,
    ping_deadline: Option<Instant>,
    closed: bool,
}

impl<T: ChatTransport> ChatConnection<T> {
    /// Creates a connection for one chat. Does not connect yet.
    pub fn new(transport: T, endpoint: ChatEndpoint, timing: ChatTiming) -> Self {
        ChatConnection {
            transport,
            endpoint,
            timing,
            reconnect_attempt: 0,
            ping_deadline: None,
            closed: false,
        }
    }

    /// Runs the full connect sequence.
    ///
    /// On success the reconnect counter resets and the ping timer is armed.
    pub fn connect(&mut self) -> ChatResult<()> {
        if self.closed {
            return Err(ChatError::ConnectionClosed);
        }
        self.transport.connect(&self.endpoint)?;
        self.reconnect_attempt = 0;
        self.ping_deadline = Some(Instant::now() + self.timing.ping_interval);
        Ok(())
    }

    /// Tears the connection down: ping timer cleared, socket closed with
    /// code 1000 so no reconnect is triggered. Terminal.
    pub fn close(&mut self) {
        self.ping_deadline = None;
        self.closed = true;
        let _ = self.transport.disconnect();
    }

    /// Returns the connection state, surfacing in-progress reconnects.
    pub fn state(&self) -> ConnectionState {
        if self.closed {
            return ConnectionState::Disconnected;
        }
        match self.transport.state() {
            ConnectionState::Disconnected if self.reconnect_attempt > 0 => {
                ConnectionState::Reconnecting {
                    attempt: self.reconnect_attempt,
                }
            }
            state => state,
        }
    }

    /// True when the socket is open.
    pub fn is_connected(&self) -> bool {
        !self.closed && self.transport.state() == ConnectionState::Connected
    }

    /// Decides what to do after the socket dropped.
    ///
    /// Close code 1000 never triggers a reconnect; any other close yields at
    /// most `max_reconnect_attempts` retries, each after the fixed delay.
    pub fn on_disconnected(&mut self) -> Reconnect {
        self.ping_deadline = None;
        if self.closed {
            return Reconnect::Stop;
        }
        if self.transport.last_close_code() == Some(CLOSE_NORMAL) {
            self.closed = true;
            return Reconnect::Stop;
        }
        if self.reconnect_attempt >= self.timing.max_reconnect_attempts {
            self.closed = true;
            return Reconnect::Stop;
        }
        self.reconnect_attempt += 1;
        Reconnect::RetryAfter(self.timing.reconnect_delay)
    }

    /// Re-runs the full connect sequence after [`Reconnect::RetryAfter`].
    pub fn reconnect(&mut self) -> ChatResult<()> {
        if self.closed {
            return Err(ChatError::MaxReconnectsExceeded);
        }
        let _ = self.transport.disconnect();
        self.transport.connect(&self.endpoint)?;
        self.reconnect_attempt = 0;
        self.ping_deadline = Some(Instant::now() + self.timing.ping_interval);
        Ok(())
    }

    /// Sends a ping frame when the interval has elapsed. Returns whether a
    /// ping went out.
    pub fn ping_if_due(&mut self, now: Instant) -> ChatResult<bool> {
        if !self.is_connected() {
            return Ok(false);
        }
        match self.ping_deadline {
            Some(deadline) if now >= deadline => {
                self.transport.send(&ChatFrame::Ping)?;
                self.ping_deadline = Some(now + self.timing.ping_interval);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Receives the next inbound frame, or None on timeout.
    pub fn receive(&mut self) -> ChatResult<Option<ChatFrame>> {
        if !self.is_connected() {
            return Err(ChatError::NotConnected);
        }
        self.transport.receive()
    }

    // === Outbound operations ===
    //
    // There is no outbound queueing: every operation fails immediately when
    // the socket is not open.

    /// Sends a text message. Returns the client-generated message id.
    pub fn send_text(&mut self, text: &str, reply_to_id: Option<&str>) -> ChatResult<String> {
        let frame = ChatFrame::outbound_message(text, reply_to_id);
        let id = match &frame {
            ChatFrame::Message { id: Some(id), .. } => id.clone(),
            _ => unreachable!("outbound_message always sets an id"),
        };
        self.send(&frame)?;
        Ok(id)
    }

    /// Signals that the local user is typing.
    pub fn send_typing(&mut self) -> ChatResult<()> {
        let user_id = self.endpoint.user_id.clone();
        self.send(&ChatFrame::Typing { user_id })
    }

    /// Signals that the local user stopped typing.
    pub fn send_stop_typing(&mut self) -> ChatResult<()> {
        let user_id = self.endpoint.user_id.clone();
        self.send(&ChatFrame::StopTyping { user_id })
    }

    /// Marks a single message as read.
    pub fn mark_as_read(&mut self, message_id: &str) -> ChatResult<()> {
        self.send(&ChatFrame::MarkAsRead {
            message_id: message_id.to_string(),
        })
    }

    /// Marks every message in the chat as read.
    pub fn mark_all_as_read(&mut self) -> ChatResult<()> {
        self.send(&ChatFrame::MarkAllAsRead)
    }

    /// Deletes a message.
    pub fn delete_message(&mut self, message_id: &str) -> ChatResult<()> {
        self.send(&ChatFrame::DeleteMessage {
            message_id: message_id.to_string(),
        })
    }

    /// Edits a message's text.
    pub fn edit_message(&mut self, message_id: &str, text: &str) -> ChatResult<()> {
        self.send(&ChatFrame::EditMessage {
            message_id: message_id.to_string(),
            text: text.to_string(),
        })
    }

    /// Current reconnect attempt count.
    pub fn reconnect_attempt(&self) -> u32 {
        self.reconnect_attempt
    }

    /// The endpoint this connection targets.
    pub fn endpoint(&self) -> &ChatEndpoint {
        &self.endpoint
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn send(&mut self, frame: &ChatFrame) -> ChatResult<()> {
        if !self.is_connected() {
            return Err(ChatError::NotConnected);
        }
        self.transport.send(frame)
    }
}
