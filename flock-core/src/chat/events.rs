//! Event System
//!
//! Callbacks for chat events.

use std::sync::Arc;

use super::transport::ConnectionState;

/// Events emitted by the chat manager.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The peer came online.
    PeerOnline {
        /// The chat ID.
        chat_id: String,
    },

    /// The peer went offline.
    PeerOffline {
        /// The chat ID.
        chat_id: String,
    },

    /// The peer's typing indicator changed.
    TypingChanged {
        /// The chat ID.
        chat_id: String,
        /// The new typing state.
        is_typing: bool,
    },

    /// A message arrived from the peer.
    MessageReceived {
        /// The chat ID.
        chat_id: String,
        /// Sender of the message.
        sender_id: String,
        /// Message text.
        text: String,
        /// Unix timestamp in milliseconds.
        sent_at: u64,
    },

    /// The chat list order changed.
    RosterReordered,

    /// A chat socket's connection state changed.
    ConnectionStateChanged {
        /// The chat ID.
        chat_id: String,
        /// The new connection state.
        state: ConnectionState,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive chat events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: ChatEvent);
}

/// Simple callback-based event handler.
///
/// Wraps a closure for easy event handling.
pub struct CallbackHandler<F>
where
    F: Fn(ChatEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(ChatEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(ChatEvent) + Send + Sync,
{
    fn on_event(&self, event: ChatEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: ChatEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}
