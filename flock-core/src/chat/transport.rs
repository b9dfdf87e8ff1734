//! Chat Transport Trait
//!
//! Platform-agnostic abstraction over the per-chat socket.

use super::error::ChatError;
use super::frame::ChatFrame;

/// Result type for chat transport operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// WebSocket close code for a clean, intentional close.
pub const CLOSE_NORMAL: u16 = 1000;

/// Connection state of a chat socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected.
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Connected and ready.
    Connected,
    /// Connection lost, retry scheduled.
    Reconnecting { attempt: u32 },
}

/// Address of a single chat socket.
///
/// The server multiplexes nothing: one socket per chat, authenticated by the
/// access token in the query string.
#[derive(Debug, Clone)]
pub struct ChatEndpoint {
    /// WebSocket base URL (e.g. `wss://api.example.com`).
    pub ws_base_url: String,
    /// The chat this socket belongs to.
    pub chat_id: String,
    /// The local user's id.
    pub user_id: String,
    /// Access token passed as a query parameter.
    pub token: String,
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read/write timeout in milliseconds; bounds how long `receive` blocks.
    pub io_timeout_ms: u64,
}

impl ChatEndpoint {
    /// Builds the full socket URL:
    /// `{ws_base_url}/messages/ws/chats/{chat_id}/{user_id}?token={token}`.
    pub fn url(&self) -> String {
        format!(
            "{}/messages/ws/chats/{}/{}?token={}",
            self.ws_base_url.trim_end_matches('/'),
            self.chat_id,
            self.user_id,
            self.token
        )
    }
}

/// Transport trait for a single chat socket.
///
/// This abstracts the underlying WebSocket so connection management can be
/// tested against a mock. Implementations expose a blocking interface; the
/// host loop drives polling.
pub trait ChatTransport: Send {
    /// Opens the socket.
    fn connect(&mut self, endpoint: &ChatEndpoint) -> ChatResult<()>;

    /// Closes the socket cleanly (close code 1000).
    ///
    /// Safe to call when not connected.
    fn disconnect(&mut self) -> ChatResult<()>;

    /// Returns the current connection state.
    fn state(&self) -> ConnectionState;

    /// Sends a frame. Returns an error if not connected.
    fn send(&mut self, frame: &ChatFrame) -> ChatResult<()>;

    /// Receives the next frame, or `Ok(None)` when the read timed out with
    /// nothing available. Returns [`ChatError::ConnectionClosed`] once the
    /// peer has closed the socket.
    fn receive(&mut self) -> ChatResult<Option<ChatFrame>>;

    /// Close code from the most recent close, if the peer sent one.
    fn last_close_code(&self) -> Option<u16>;
}
