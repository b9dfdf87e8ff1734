// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Chat Transport
//!
//! In-memory transport for exercising connection management and event
//! reconciliation without a server.

use std::collections::VecDeque;

use super::error::ChatError;
use super::frame::ChatFrame;
use super::transport::{ChatEndpoint, ChatResult, ChatTransport, ConnectionState};

/// Mock transport with scripted inbound frames and recorded outbound frames.
pub struct MockChatTransport {
    state: ConnectionState,
    inbound: VecDeque<ChatFrame>,
    sent: Vec<ChatFrame>,
    last_close_code: Option<u16>,
    /// Close delivered on the next `receive` once the queue drains.
    pending_close: Option<u16>,
    fail_next_connect: bool,
    connect_calls: u32,
}

impl Default for MockChatTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChatTransport {
    pub fn new() -> Self {
        MockChatTransport {
            state: ConnectionState::Disconnected,
            inbound: VecDeque::new(),
            sent: Vec::new(),
            last_close_code: None,
            pending_close: None,
            fail_next_connect: false,
            connect_calls: 0,
        }
    }

    /// Queues a frame to be returned by `receive`.
    pub fn queue_receive(&mut self, frame: ChatFrame) {
        self.inbound.push_back(frame);
    }

    /// Simulates the server closing the socket with `code` after the queued
    /// frames have been drained.
    pub fn close_with(&mut self, code: u16) {
        self.pending_close = Some(code);
    }

    /// Makes the next `connect` call fail.
    pub fn fail_next_connect(&mut self) {
        self.fail_next_connect = true;
    }

    /// Forces the connection state (to simulate an abrupt drop).
    pub fn set_state(&mut self, state: ConnectionState) {
        self.state = state;
    }

    /// Returns every frame sent so far.
    pub fn sent_frames(&self) -> &[ChatFrame] {
        &self.sent
    }

    /// Number of successful `connect` calls.
    pub fn connect_calls(&self) -> u32 {
        self.connect_calls
    }
}

impl ChatTransport for MockChatTransport {
    fn connect(&mut self, _endpoint: &ChatEndpoint) -> ChatResult<()> {
        if self.fail_next_connect {
            self.fail_next_connect = false;
            self.state = ConnectionState::Disconnected;
            return Err(ChatError::ConnectionFailed("mock connect failure".into()));
        }
        self.state = ConnectionState::Connected;
        self.last_close_code = None;
        self.pending_close = None;
        self.connect_calls += 1;
        Ok(())
    }

    fn disconnect(&mut self) -> ChatResult<()> {
        if self.state == ConnectionState::Connected {
            self.last_close_code = Some(super::transport::CLOSE_NORMAL);
        }
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.state.clone()
    }

    fn send(&mut self, frame: &ChatFrame) -> ChatResult<()> {
        if self.state != ConnectionState::Connected {
            return Err(ChatError::NotConnected);
        }
        self.sent.push(frame.clone());
        Ok(())
    }

    fn receive(&mut self) -> ChatResult<Option<ChatFrame>> {
        if self.state != ConnectionState::Connected {
            return Err(ChatError::NotConnected);
        }
        if let Some(frame) = self.inbound.pop_front() {
            return Ok(Some(frame));
        }
        if let Some(code) = self.pending_close.take() {
            self.last_close_code = Some(code);
            self.state = ConnectionState::Disconnected;
            return Err(ChatError::ConnectionClosed);
        }
        Ok(None)
    }

    fn last_close_code(&self) -> Option<u16> {
        self.last_close_code
    }
}
