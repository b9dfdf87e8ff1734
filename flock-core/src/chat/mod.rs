//! Real-Time Chat Layer
//!
//! WebSocket connection management and event reconciliation for chats.
//!
//! # Architecture
//!
//! The chat layer consists of:
//! - **Frame types**: JSON wire protocol discriminated by `type`
//! - **Transport trait**: platform-agnostic interface for the socket
//! - **Connection**: per-chat lifecycle with ping keepalive and bounded
//!   reconnection on abnormal closes
//! - **Roster**: the chat list, always sorted by last-message timestamp
//!   descending
//! - **Manager**: one connection per open chat, typing debounce deadlines,
//!   reconciliation of presence/typing/message events, teardown
//!
//! # Example
//!
//! ```ignore
//! use std::time::Instant;
//! use flock_core::chat::{ChatManager, WebSocketTransport};
//!
//! let mut manager = ChatManager::new(&config, user_id, token, WebSocketTransport::new);
//! manager.load_roster(chats);
//! manager.open_chat("chat-1")?;
//!
//! // Host loop
//! let report = manager.pump("chat-1", Instant::now())?;
//! manager.expire_typing(Instant::now());
//! if let Some(delay) = report.reconnect_after {
//!     // sleep(delay), then manager.reconnect("chat-1")
//! }
//! ```

#[cfg(feature = "testing")]
pub mod connection;
#[cfg(not(feature = "testing"))]
mod connection;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod events;
#[cfg(not(feature = "testing"))]
mod events;

#[cfg(feature = "testing")]
pub mod frame;
#[cfg(not(feature = "testing"))]
mod frame;

#[cfg(feature = "testing")]
pub mod manager;
#[cfg(not(feature = "testing"))]
mod manager;

#[cfg(feature = "testing")]
pub mod mock;
#[cfg(not(feature = "testing"))]
mod mock;

#[cfg(feature = "testing")]
pub mod roster;
#[cfg(not(feature = "testing"))]
mod roster;

#[cfg(feature = "testing")]
pub mod transport;
#[cfg(not(feature = "testing"))]
mod transport;

#[cfg(all(
    any(feature = "network-native-tls", feature = "network-rustls"),
    feature = "testing"
))]
pub mod websocket;
#[cfg(all(
    any(feature = "network-native-tls", feature = "network-rustls"),
    not(feature = "testing")
))]
mod websocket;

// Error types
pub use error::ChatError;

// Wire frames
pub use frame::ChatFrame;

// Transport abstraction
pub use transport::{ChatEndpoint, ChatResult, ChatTransport, ConnectionState, CLOSE_NORMAL};

// Mock transport for testing
pub use mock::MockChatTransport;

// WebSocket transport for production
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
pub use websocket::WebSocketTransport;

// Connection management
pub use connection::{ChatConnection, ChatTiming, Reconnect};

// Roster
pub use roster::{Chat, ChatRoster};

// Events
pub use events::{CallbackHandler, ChatEvent, EventDispatcher, EventHandler};

// Manager
pub use manager::{ChatManager, PumpReport};
