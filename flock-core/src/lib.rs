//! Flock Core Library
//!
//! Client library for the Flock social network: feed, posts, comments,
//! follow graph, profiles and real-time chat. This is the UI-free core of
//! the mobile app; persistence, fan-out, ranking and consistency are all
//! server-side concerns consumed through the REST and WebSocket interfaces.

pub mod api;
pub mod chat;
pub mod config;
pub mod http;
pub mod storage;

pub use api::{
    AuthClient, ChatApiClient, ChatMessage, Comment, CommentClient, FeedClient, Flock,
    FlockBuilder, FlockError, FlockResult, FollowClient, FollowEdge, LocationHit, MapClient, Post,
    PostClient, Profile, Reply, User, UserClient,
};
pub use chat::{
    CallbackHandler, Chat, ChatConnection, ChatEndpoint, ChatError, ChatEvent, ChatFrame,
    ChatManager, ChatRoster, ChatTiming, ChatTransport, ConnectionState, EventDispatcher,
    EventHandler, MockChatTransport, PumpReport, Reconnect,
};
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
pub use chat::WebSocketTransport;
pub use config::ClientConfig;
pub use http::{
    ApiClient, HttpError, HttpRequest, HttpResponse, HttpTransport, Method, MockHttp,
    ReqwestTransport,
};
#[cfg(feature = "secure-storage")]
pub use storage::PlatformKeyring;
pub use storage::{MemoryStore, SecureStore, StorageError, TokenStore, Tokens};
