// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flock Orchestrator
//!
//! Main entry point for the Flock API.

use super::auth::AuthClient;
use super::chats::ChatApiClient;
use super::comments::CommentClient;
use super::error::{FlockError, FlockResult};
use super::feed::FeedClient;
use super::follows::FollowClient;
use super::map::MapClient;
use super::models::User;
use super::posts::PostClient;
use super::users::UserClient;
use crate::chat::{ChatManager, ChatTransport};
use crate::config::ClientConfig;
use crate::http::{ApiClient, HttpError, HttpTransport, MockHttp, ReqwestTransport};
use crate::storage::{MemoryStore, SecureStore, TokenStore};

/// Main Flock orchestrator.
///
/// This is the primary entry point for using Flock. It coordinates:
/// - The user session (tokens, current user)
/// - Typed REST resource clients
/// - Chat manager construction
///
/// # Example
///
/// ```ignore
/// use flock_core::api::{Flock, FlockBuilder};
/// use flock_core::config::ClientConfig;
///
/// let config = ClientConfig::from_env();
/// let mut flock = Flock::new(config)?;
///
/// let user = flock.login("ada", "hunter2")?;
/// let posts = flock.feed().feed(20, 0)?;
///
/// let mut chats = flock.chat_manager()?;
/// chats.load_roster(flock.chats().list_chats()?);
/// ```
pub struct Flock<S: SecureStore = MemoryStore, T: HttpTransport = ReqwestTransport> {
    config: ClientConfig,
    http: ApiClient<S, T>,
    current_user: Option<User>,
}

impl Flock<MemoryStore, ReqwestTransport> {
    /// Creates a Flock instance with the default transport and an in-memory
    /// token store.
    pub fn new(config: ClientConfig) -> FlockResult<Self> {
        FlockBuilder::new(config).map(FlockBuilder::build)
    }
}

impl Flock<MemoryStore, MockHttp> {
    /// Creates a Flock instance over a scripted HTTP transport (for tests).
    pub fn with_mock_http(config: ClientConfig) -> Self {
        FlockBuilder {
            store: MemoryStore::new(),
            transport: MockHttp::new(),
            config,
        }
        .build()
    }
}

impl<S: SecureStore, T: HttpTransport> Flock<S, T> {
    // === Session ===

    /// Logs in and remembers the current user.
    pub fn login(&mut self, username: &str, password: &str) -> FlockResult<User> {
        let user = self.auth().login(username, password)?;
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Restores a session from stored tokens, if any.
    ///
    /// Returns `Ok(None)` when no usable session exists; stale tokens are
    /// cleared.
    pub fn restore_session(&mut self) -> FlockResult<Option<User>> {
        if self.http.tokens().tokens()?.is_none() {
            return Ok(None);
        }

        match self.users().me() {
            Ok(profile) => {
                let user = User {
                    id: profile.id,
                    username: profile.username,
                    avatar_url: profile.avatar_url,
                };
                self.current_user = Some(user.clone());
                Ok(Some(user))
            }
            Err(FlockError::Http(HttpError::Unauthorized)) => {
                self.http.tokens().clear()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Ends the session and forgets the current user.
    pub fn logout(&mut self) -> FlockResult<()> {
        self.auth().logout()?;
        self.current_user = None;
        Ok(())
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The authenticated request client.
    pub fn http(&self) -> &ApiClient<S, T> {
        &self.http
    }

    // === Resource clients ===

    /// Auth operations (`/auth`).
    pub fn auth(&self) -> AuthClient<'_, S, T> {
        AuthClient::new(&self.http)
    }

    /// User/profile operations (`/users`).
    pub fn users(&self) -> UserClient<'_, S, T> {
        UserClient::new(&self.http)
    }

    /// Follow graph operations (`/followers`).
    pub fn follows(&self) -> FollowClient<'_, S, T> {
        FollowClient::new(&self.http)
    }

    /// Post operations (`/post`, `/saved`).
    pub fn posts(&self) -> PostClient<'_, S, T> {
        PostClient::new(&self.http)
    }

    /// Comment and reply operations (`/comment`, `/comment-replies`).
    pub fn comments(&self) -> CommentClient<'_, S, T> {
        CommentClient::new(&self.http)
    }

    /// Home feed (`/feed`).
    pub fn feed(&self) -> FeedClient<'_, S, T> {
        FeedClient::new(&self.http)
    }

    /// Nearby users and location lookup (`/map`).
    pub fn map(&self) -> MapClient<'_, S, T> {
        MapClient::new(&self.http, &self.config)
    }

    /// Chat REST surface (`/chat`).
    pub fn chats(&self) -> ChatApiClient<'_, S, T> {
        ChatApiClient::new(&self.http)
    }

    // === Chat manager ===

    /// Builds a chat manager over the production WebSocket transport.
    ///
    /// Requires a logged-in user and a stored access token. The token is
    /// captured at construction; a manager outliving a token refresh keeps
    /// using the old one until recreated.
    #[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
    pub fn chat_manager(&self) -> FlockResult<ChatManager<crate::chat::WebSocketTransport>> {
        self.chat_manager_with(crate::chat::WebSocketTransport::new)
    }

    /// Builds a chat manager over a custom transport factory.
    pub fn chat_manager_with<C, F>(&self, factory: F) -> FlockResult<ChatManager<C>>
    where
        C: ChatTransport,
        F: Fn() -> C + Send + 'static,
    {
        let user = self
            .current_user
            .as_ref()
            .ok_or(FlockError::NotAuthenticated)?;
        let token = self
            .http
            .tokens()
            .access_token()?
            .ok_or(FlockError::NotAuthenticated)?;

        Ok(ChatManager::new(&self.config, user.id.clone(), token, factory))
    }
}

/// Builder for wiring custom stores and transports into [`Flock`].
pub struct FlockBuilder<S: SecureStore, T: HttpTransport> {
    config: ClientConfig,
    store: S,
    transport: T,
}

impl FlockBuilder<MemoryStore, ReqwestTransport> {
    /// Starts a builder with the default transport and in-memory store.
    pub fn new(config: ClientConfig) -> FlockResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(FlockBuilder {
            config,
            store: MemoryStore::new(),
            transport,
        })
    }
}

impl<S: SecureStore, T: HttpTransport> FlockBuilder<S, T> {
    /// Swaps in a different secure store (e.g. the platform keyring).
    pub fn with_store<S2: SecureStore>(self, store: S2) -> FlockBuilder<S2, T> {
        FlockBuilder {
            config: self.config,
            store,
            transport: self.transport,
        }
    }

    /// Swaps in a different HTTP transport.
    pub fn with_transport<T2: HttpTransport>(self, transport: T2) -> FlockBuilder<S, T2> {
        FlockBuilder {
            config: self.config,
            store: self.store,
            transport,
        }
    }

    /// Builds the Flock instance.
    pub fn build(self) -> Flock<S, T> {
        let tokens = TokenStore::new(self.store, &self.config);
        Flock {
            http: ApiClient::new(self.transport, tokens),
            config: self.config,
            current_user: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MockChatTransport;
    use crate::http::HttpResponse;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new("https://api.test", "wss://api.test")
    }

    fn login_response() -> HttpResponse {
        HttpResponse::json_body(
            200,
            json!({
                "access_token": "a1",
                "refresh_token": "r1",
                "user": {"id": "u1", "username": "ada"}
            }),
        )
    }

    #[test]
    fn test_login_sets_current_user() {
        let mut flock = Flock::with_mock_http(config());
        flock.http().transport().push_response(login_response());

        let user = flock.login("ada", "pw").unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(flock.current_user().unwrap().username, "ada");
    }

    #[test]
    fn test_chat_manager_requires_session() {
        let flock = Flock::with_mock_http(config());
        let result = flock.chat_manager_with(MockChatTransport::new);
        assert!(matches!(result, Err(FlockError::NotAuthenticated)));
    }

    #[test]
    fn test_chat_manager_after_login() {
        let mut flock = Flock::with_mock_http(config());
        flock.http().transport().push_response(login_response());
        flock.login("ada", "pw").unwrap();

        let mut manager = flock.chat_manager_with(MockChatTransport::new).unwrap();
        assert_eq!(manager.open_chat_count(), 0);
        manager.load_roster(Vec::new());
    }

    #[test]
    fn test_restore_session_without_tokens() {
        let mut flock = Flock::with_mock_http(config());
        let restored = flock.restore_session().unwrap();
        assert!(restored.is_none());
        // No network traffic happened
        assert_eq!(flock.http().transport().request_count(), 0);
    }

    #[test]
    fn test_logout_forgets_user() {
        let mut flock = Flock::with_mock_http(config());
        flock.http().transport().push_response(login_response());
        flock.login("ada", "pw").unwrap();

        flock.http().transport().push_response(HttpResponse::empty(200));
        flock.logout().unwrap();

        assert!(flock.current_user().is_none());
        assert!(flock.http().tokens().tokens().unwrap().is_none());
    }
}
