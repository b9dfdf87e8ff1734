//! Mobile-friendly data types.
//!
//! These types are wrappers around flock-core types that are compatible
//! with UniFFI for cross-language bindings.

use flock_core::{
    Chat, ChatEvent, ChatMessage, Comment, ConnectionState, FollowEdge, LocationHit, Post,
    Profile, PumpReport, Reply, User,
};

/// Mobile-friendly user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileUser {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

impl From<User> for MobileUser {
    fn from(user: User) -> Self {
        MobileUser {
            id: user.id,
            username: user.username,
            avatar_url: user.avatar_url,
        }
    }
}

/// Mobile-friendly profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileProfile {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub followers_count: u32,
    pub following_count: u32,
    pub posts_count: u32,
    pub is_following: bool,
}

impl From<Profile> for MobileProfile {
    fn from(profile: Profile) -> Self {
        MobileProfile {
            id: profile.id,
            username: profile.username,
            avatar_url: profile.avatar_url,
            bio: profile.bio,
            followers_count: profile.followers_count,
            following_count: profile.following_count,
            posts_count: profile.posts_count,
            is_following: profile.is_following,
        }
    }
}

/// Mobile-friendly post.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobilePost {
    pub id: String,
    pub author: MobileUser,
    pub caption: String,
    pub image_url: Option<String>,
    pub likes_count: u32,
    pub is_liked: bool,
    pub comments_count: u32,
    pub is_saved: bool,
    pub created_at: u64,
}

impl From<Post> for MobilePost {
    fn from(post: Post) -> Self {
        MobilePost {
            id: post.id,
            author: post.author.into(),
            caption: post.caption,
            image_url: post.image_url,
            likes_count: post.likes_count,
            is_liked: post.is_liked,
            comments_count: post.comments_count,
            is_saved: post.is_saved,
            created_at: post.created_at,
        }
    }
}

/// Mobile-friendly comment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileComment {
    pub id: String,
    pub post_id: String,
    pub author: MobileUser,
    pub text: String,
    pub likes_count: u32,
    pub is_liked: bool,
    pub replies_count: u32,
    pub created_at: u64,
}

impl From<Comment> for MobileComment {
    fn from(comment: Comment) -> Self {
        MobileComment {
            id: comment.id,
            post_id: comment.post_id,
            author: comment.author.into(),
            text: comment.text,
            likes_count: comment.likes_count,
            is_liked: comment.is_liked,
            replies_count: comment.replies_count,
            created_at: comment.created_at,
        }
    }
}

/// Mobile-friendly reply.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileReply {
    pub id: String,
    pub comment_id: String,
    pub author: MobileUser,
    pub text: String,
    pub created_at: u64,
}

impl From<Reply> for MobileReply {
    fn from(reply: Reply) -> Self {
        MobileReply {
            id: reply.id,
            comment_id: reply.comment_id,
            author: reply.author.into(),
            text: reply.text,
            created_at: reply.created_at,
        }
    }
}

/// Mobile-friendly follow edge.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileFollowEdge {
    pub user: MobileUser,
    pub since: Option<u64>,
}

impl From<FollowEdge> for MobileFollowEdge {
    fn from(edge: FollowEdge) -> Self {
        MobileFollowEdge {
            user: edge.user.into(),
            since: edge.since,
        }
    }
}

/// Mobile-friendly chat list entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileChat {
    pub id: String,
    pub peer_id: String,
    pub peer_username: String,
    pub peer_avatar: Option<String>,
    pub last_message: Option<String>,
    pub last_message_at: Option<u64>,
    pub unread_count: u32,
    pub is_read: bool,
    pub is_online: bool,
    pub is_typing: bool,
    pub created_at: u64,
}

impl From<&Chat> for MobileChat {
    fn from(chat: &Chat) -> Self {
        MobileChat {
            id: chat.id.clone(),
            peer_id: chat.peer_id.clone(),
            peer_username: chat.peer_username.clone(),
            peer_avatar: chat.peer_avatar.clone(),
            last_message: chat.last_message.clone(),
            last_message_at: chat.last_message_at,
            unread_count: chat.unread_count,
            is_read: chat.is_read,
            is_online: chat.is_online,
            is_typing: chat.is_typing,
            created_at: chat.created_at,
        }
    }
}

/// Mobile-friendly chat history message.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileChatMessage {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub text: String,
    pub reply_to_id: Option<String>,
    pub is_read: bool,
    pub created_at: u64,
}

impl From<ChatMessage> for MobileChatMessage {
    fn from(message: ChatMessage) -> Self {
        MobileChatMessage {
            id: message.id,
            chat_id: message.chat_id,
            sender_id: message.sender_id,
            text: message.text,
            reply_to_id: message.reply_to_id,
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

/// Mobile-friendly location hit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileLocationHit {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<LocationHit> for MobileLocationHit {
    fn from(hit: LocationHit) -> Self {
        MobileLocationHit {
            display_name: hit.display_name,
            lat: hit.lat,
            lon: hit.lon,
        }
    }
}

/// Mobile-friendly connection state.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum MobileConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
}

impl From<ConnectionState> for MobileConnectionState {
    fn from(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Disconnected => MobileConnectionState::Disconnected,
            ConnectionState::Connecting => MobileConnectionState::Connecting,
            ConnectionState::Connected => MobileConnectionState::Connected,
            ConnectionState::Reconnecting { attempt } => {
                MobileConnectionState::Reconnecting { attempt }
            }
        }
    }
}

/// Mobile-friendly chat event, drained by the host UI loop.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum MobileChatEvent {
    PeerOnline {
        chat_id: String,
    },
    PeerOffline {
        chat_id: String,
    },
    TypingChanged {
        chat_id: String,
        is_typing: bool,
    },
    MessageReceived {
        chat_id: String,
        sender_id: String,
        text: String,
        sent_at: u64,
    },
    RosterReordered,
    ConnectionStateChanged {
        chat_id: String,
        state: MobileConnectionState,
    },
}

impl From<ChatEvent> for MobileChatEvent {
    fn from(event: ChatEvent) -> Self {
        match event {
            ChatEvent::PeerOnline { chat_id } => MobileChatEvent::PeerOnline { chat_id },
            ChatEvent::PeerOffline { chat_id } => MobileChatEvent::PeerOffline { chat_id },
            ChatEvent::TypingChanged { chat_id, is_typing } => {
                MobileChatEvent::TypingChanged { chat_id, is_typing }
            }
            ChatEvent::MessageReceived {
                chat_id,
                sender_id,
                text,
                sent_at,
            } => MobileChatEvent::MessageReceived {
                chat_id,
                sender_id,
                text,
                sent_at,
            },
            ChatEvent::RosterReordered => MobileChatEvent::RosterReordered,
            ChatEvent::ConnectionStateChanged { chat_id, state } => {
                MobileChatEvent::ConnectionStateChanged {
                    chat_id,
                    state: state.into(),
                }
            }
        }
    }
}

/// Result of one pump pass over a chat socket.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobilePumpResult {
    /// Number of frames reconciled.
    pub frames: u32,
    /// When set, the host should wait this many milliseconds and call
    /// `reconnect_chat`.
    pub reconnect_after_ms: Option<u64>,
}

impl From<PumpReport> for MobilePumpResult {
    fn from(report: PumpReport) -> Self {
        MobilePumpResult {
            frames: report.frames as u32,
            reconnect_after_ms: report.reconnect_after.map(|d| d.as_millis() as u64),
        }
    }
}
