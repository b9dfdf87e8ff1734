//! Flock Mobile Bindings
//!
//! UniFFI bindings for Android and iOS platforms.
//! Exposes a simplified, mobile-friendly API on top of flock-core.
//!
//! Token persistence stays with the host: Android Keystore / iOS Keychain
//! hold the token pair and hand it back through `restore_session`. The
//! library keeps tokens in memory for the lifetime of the process.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use flock_core::{
    CallbackHandler, ChatManager, ClientConfig, Flock, Tokens, WebSocketTransport,
};

// === Modules ===

mod error;
mod types;

// Re-export public types
pub use error::MobileError;
pub use types::{
    MobileChat, MobileChatEvent, MobileChatMessage, MobileComment, MobileConnectionState,
    MobileFollowEdge, MobileLocationHit, MobileProfile, MobilePost, MobilePumpResult,
    MobileReply, MobileUser,
};

uniffi::setup_scaffolding!();

/// Main Flock interface for mobile platforms.
///
/// All calls are blocking; hosts drive them from a background executor and
/// poll `pump_chat`/`drain_events` from their UI loop cadence.
#[derive(uniffi::Object)]
pub struct FlockMobile {
    flock: Mutex<Flock>,
    chats: Mutex<Option<ChatManager<WebSocketTransport>>>,
    events: Arc<Mutex<Vec<MobileChatEvent>>>,
}

#[uniffi::export]
impl FlockMobile {
    /// Creates a client against the given API and WebSocket base URLs.
    #[uniffi::constructor]
    pub fn new(api_base_url: String, ws_base_url: String) -> Result<Arc<Self>, MobileError> {
        let config = ClientConfig::new(&api_base_url, &ws_base_url);
        let flock = Flock::new(config).map_err(MobileError::from)?;

        Ok(Arc::new(FlockMobile {
            flock: Mutex::new(flock),
            chats: Mutex::new(None),
            events: Arc::new(Mutex::new(Vec::new())),
        }))
    }

    // === Session ===

    /// Logs in and returns the user. Tokens are kept in memory; persist the
    /// pair via `session_tokens` if the host wants auto-login.
    pub fn login(&self, username: String, password: String) -> Result<MobileUser, MobileError> {
        let mut flock = self.flock.lock().unwrap();
        let user = flock.login(&username, &password)?;
        Ok(user.into())
    }

    /// The current token pair, for the host to persist securely.
    pub fn session_tokens(&self) -> Result<Option<Vec<String>>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let tokens = flock.http().tokens().tokens()?;
        Ok(tokens.map(|t| vec![t.access, t.refresh]))
    }

    /// Restores a session from a token pair persisted by the host.
    pub fn restore_session(
        &self,
        access_token: String,
        refresh_token: String,
    ) -> Result<Option<MobileUser>, MobileError> {
        let mut flock = self.flock.lock().unwrap();
        flock.http().tokens().set(&Tokens {
            access: access_token,
            refresh: refresh_token,
        })?;
        let user = flock.restore_session()?;
        Ok(user.map(MobileUser::from))
    }

    /// Ends the session and tears down any chat connections.
    pub fn logout(&self) -> Result<(), MobileError> {
        self.end_chat_session();
        let mut flock = self.flock.lock().unwrap();
        flock.logout()?;
        Ok(())
    }

    // === Feed and posts ===

    /// One page of the home feed.
    pub fn feed(&self, limit: u32, offset: u32) -> Result<Vec<MobilePost>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let posts = flock.feed().feed(limit, offset)?;
        Ok(posts.into_iter().map(MobilePost::from).collect())
    }

    /// Creates a post.
    pub fn create_post(
        &self,
        caption: String,
        image_url: Option<String>,
    ) -> Result<MobilePost, MobileError> {
        let flock = self.flock.lock().unwrap();
        let post = flock.posts().create_post(&caption, image_url.as_deref())?;
        Ok(post.into())
    }

    /// Deletes a post.
    pub fn delete_post(&self, post_id: String) -> Result<(), MobileError> {
        let flock = self.flock.lock().unwrap();
        flock.posts().delete_post(&post_id)?;
        Ok(())
    }

    /// Likes a post. The host flips its UI state optimistically and reverts
    /// when this returns an error.
    pub fn add_like(&self, post_id: String) -> Result<(), MobileError> {
        let flock = self.flock.lock().unwrap();
        flock.posts().add_like(&post_id)?;
        Ok(())
    }

    /// Removes a like.
    pub fn remove_like(&self, post_id: String) -> Result<(), MobileError> {
        let flock = self.flock.lock().unwrap();
        flock.posts().remove_like(&post_id)?;
        Ok(())
    }

    /// Saves a post.
    pub fn save_post(&self, post_id: String) -> Result<(), MobileError> {
        let flock = self.flock.lock().unwrap();
        flock.posts().save_post(&post_id)?;
        Ok(())
    }

    /// Removes a post from the saved collection.
    pub fn unsave_post(&self, post_id: String) -> Result<(), MobileError> {
        let flock = self.flock.lock().unwrap();
        flock.posts().unsave_post(&post_id)?;
        Ok(())
    }

    /// The saved posts collection.
    pub fn saved_posts(&self) -> Result<Vec<MobilePost>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let posts = flock.posts().saved_posts()?;
        Ok(posts.into_iter().map(MobilePost::from).collect())
    }

    // === Comments ===

    /// Comments on a post.
    pub fn comments_for_post(&self, post_id: String) -> Result<Vec<MobileComment>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let comments = flock.comments().comments_for_post(&post_id)?;
        Ok(comments.into_iter().map(MobileComment::from).collect())
    }

    /// Adds a comment.
    pub fn add_comment(
        &self,
        post_id: String,
        text: String,
    ) -> Result<MobileComment, MobileError> {
        let flock = self.flock.lock().unwrap();
        let comment = flock.comments().add_comment(&post_id, &text)?;
        Ok(comment.into())
    }

    /// Replies to a comment.
    pub fn add_reply(
        &self,
        comment_id: String,
        text: String,
    ) -> Result<MobileReply, MobileError> {
        let flock = self.flock.lock().unwrap();
        let reply = flock.comments().add_reply(&comment_id, &text)?;
        Ok(reply.into())
    }

    /// Replies under a comment.
    pub fn replies(&self, comment_id: String) -> Result<Vec<MobileReply>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let replies = flock.comments().replies(&comment_id)?;
        Ok(replies.into_iter().map(MobileReply::from).collect())
    }

    // === Users and follow graph ===

    /// A user's profile.
    pub fn get_profile(&self, user_id: String) -> Result<MobileProfile, MobileError> {
        let flock = self.flock.lock().unwrap();
        let profile = flock.users().get_profile(&user_id)?;
        Ok(profile.into())
    }

    /// Searches users by username prefix.
    pub fn search_users(&self, query: String) -> Result<Vec<MobileUser>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let users = flock.users().search(&query)?;
        Ok(users.into_iter().map(MobileUser::from).collect())
    }

    /// Users following `user_id`.
    pub fn followers(&self, user_id: String) -> Result<Vec<MobileFollowEdge>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let edges = flock.follows().followers(&user_id)?;
        Ok(edges.into_iter().map(MobileFollowEdge::from).collect())
    }

    /// Users that `user_id` follows.
    pub fn following(&self, user_id: String) -> Result<Vec<MobileFollowEdge>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let edges = flock.follows().following(&user_id)?;
        Ok(edges.into_iter().map(MobileFollowEdge::from).collect())
    }

    /// Follows a user.
    pub fn follow(&self, user_id: String) -> Result<(), MobileError> {
        let flock = self.flock.lock().unwrap();
        flock.follows().follow(&user_id)?;
        Ok(())
    }

    /// Unfollows a user.
    pub fn unfollow(&self, user_id: String) -> Result<(), MobileError> {
        let flock = self.flock.lock().unwrap();
        flock.follows().unfollow(&user_id)?;
        Ok(())
    }

    // === Map ===

    /// Users near a coordinate.
    pub fn nearby_users(
        &self,
        lat: f64,
        lon: f64,
        radius_km: u32,
    ) -> Result<Vec<MobileUser>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let users = flock.map().nearby_users(lat, lon, radius_km)?;
        Ok(users.into_iter().map(MobileUser::from).collect())
    }

    /// Forward-geocodes a free-form query.
    pub fn lookup_location(&self, query: String) -> Result<Vec<MobileLocationHit>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let hits = flock.map().lookup_location(&query)?;
        Ok(hits.into_iter().map(MobileLocationHit::from).collect())
    }

    // === Chat ===

    /// Starts the chat session: builds the manager and bootstraps the
    /// roster over REST. Call after login/restore.
    pub fn start_chat_session(&self) -> Result<Vec<MobileChat>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let mut manager = flock.chat_manager()?;

        let chats = flock.chats().list_chats()?;
        manager.load_roster(chats);

        let sink = self.events.clone();
        manager.add_handler(Arc::new(CallbackHandler::new(move |event| {
            sink.lock().unwrap().push(event.into());
        })));

        let roster = manager.roster().chats().iter().map(MobileChat::from).collect();
        *self.chats.lock().unwrap() = Some(manager);
        Ok(roster)
    }

    /// Tears down every chat connection, timer and handler.
    pub fn end_chat_session(&self) {
        if let Some(mut manager) = self.chats.lock().unwrap().take() {
            manager.close_all();
        }
        self.events.lock().unwrap().clear();
    }

    /// The current chat list, sorted newest-first.
    pub fn roster(&self) -> Result<Vec<MobileChat>, MobileError> {
        let chats = self.chats.lock().unwrap();
        let manager = chats.as_ref().ok_or(MobileError::NotConnected)?;
        Ok(manager.roster().chats().iter().map(MobileChat::from).collect())
    }

    /// One page of a chat's message history.
    pub fn chat_messages(
        &self,
        chat_id: String,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<MobileChatMessage>, MobileError> {
        let flock = self.flock.lock().unwrap();
        let messages = flock.chats().messages(&chat_id, limit, offset)?;
        Ok(messages.into_iter().map(MobileChatMessage::from).collect())
    }

    /// Opens the socket for a chat.
    pub fn open_chat(&self, chat_id: String) -> Result<(), MobileError> {
        self.with_manager(|manager| manager.open_chat(&chat_id).map_err(MobileError::from))
    }

    /// Closes one chat's socket.
    pub fn close_chat(&self, chat_id: String) -> Result<(), MobileError> {
        self.with_manager(|manager| {
            manager.close_chat(&chat_id);
            Ok(())
        })
    }

    /// Drains one chat's socket and runs reconciliation. Call on the host
    /// loop cadence.
    pub fn pump_chat(&self, chat_id: String) -> Result<MobilePumpResult, MobileError> {
        self.with_manager(|manager| {
            let report = manager.pump(&chat_id, Instant::now())?;
            Ok(report.into())
        })
    }

    /// Retries the connection after an abnormal close. Returns the next
    /// delay in milliseconds, or None once connected.
    pub fn reconnect_chat(&self, chat_id: String) -> Result<Option<u64>, MobileError> {
        self.with_manager(|manager| {
            let next = manager.reconnect(&chat_id)?;
            Ok(next.map(|d| d.as_millis() as u64))
        })
    }

    /// Fires due typing-indicator timeouts. Returns the affected chat ids.
    pub fn expire_typing(&self) -> Result<Vec<String>, MobileError> {
        self.with_manager(|manager| Ok(manager.expire_typing(Instant::now())))
    }

    /// Sends a text message. Returns the client-side message id.
    pub fn send_message(
        &self,
        chat_id: String,
        text: String,
        reply_to_id: Option<String>,
    ) -> Result<String, MobileError> {
        self.with_manager(|manager| {
            manager
                .send_text(&chat_id, &text, reply_to_id.as_deref())
                .map_err(MobileError::from)
        })
    }

    /// Signals that the local user is typing.
    pub fn send_typing(&self, chat_id: String) -> Result<(), MobileError> {
        self.with_manager(|manager| manager.send_typing(&chat_id).map_err(MobileError::from))
    }

    /// Signals that the local user stopped typing.
    pub fn send_stop_typing(&self, chat_id: String) -> Result<(), MobileError> {
        self.with_manager(|manager| manager.send_stop_typing(&chat_id).map_err(MobileError::from))
    }

    /// Marks the whole chat as read.
    pub fn mark_all_as_read(&self, chat_id: String) -> Result<(), MobileError> {
        self.with_manager(|manager| manager.mark_all_as_read(&chat_id).map_err(MobileError::from))
    }

    /// Deletes a message.
    pub fn delete_message(&self, chat_id: String, message_id: String) -> Result<(), MobileError> {
        self.with_manager(|manager| {
            manager
                .delete_message(&chat_id, &message_id)
                .map_err(MobileError::from)
        })
    }

    /// Edits a message.
    pub fn edit_message(
        &self,
        chat_id: String,
        message_id: String,
        text: String,
    ) -> Result<(), MobileError> {
        self.with_manager(|manager| {
            manager
                .edit_message(&chat_id, &message_id, &text)
                .map_err(MobileError::from)
        })
    }

    /// Returns and clears the queued chat events for the host UI.
    pub fn drain_events(&self) -> Vec<MobileChatEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl FlockMobile {
    fn with_manager<R>(
        &self,
        f: impl FnOnce(&mut ChatManager<WebSocketTransport>) -> Result<R, MobileError>,
    ) -> Result<R, MobileError> {
        let mut chats = self.chats.lock().unwrap();
        let manager = chats.as_mut().ok_or(MobileError::NotConnected)?;
        f(manager)
    }
}
