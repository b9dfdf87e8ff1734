// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Value Records
//!
//! Plain immutable records constructed from API payloads. No lifecycle
//! beyond request-scoped fetch and optimistic local mutation that is rolled
//! back on request failure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user as returned by `/users` and embedded in posts/comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A full profile as returned by `/users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub posts_count: u32,
    #[serde(default)]
    pub is_following: bool,
}

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: User,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub is_saved: bool,
    /// Unix timestamp in milliseconds.
    pub created_at: u64,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: User,
    pub text: String,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub replies_count: u32,
    pub created_at: u64,
}

/// A reply to a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub comment_id: String,
    pub author: User,
    pub text: String,
    pub created_at: u64,
}

/// One edge of the follow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowEdge {
    pub user: User,
    /// Unix timestamp in milliseconds, when the edge was created.
    #[serde(default)]
    pub since: Option<u64>,
}

/// A message as returned by the chat REST history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub text: String,
    #[serde(default)]
    pub reply_to_id: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: u64,
}

/// Session returned by login/register.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// One hit from the external location-lookup API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationHit {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Decodes a JSON value that should be an array of `T`.
///
/// A non-array value is logged and treated as an empty result rather than an
/// error, so screens keep rendering on malformed server payloads. Malformed
/// individual items are skipped the same way.
pub fn parse_list<T: DeserializeOwned>(value: Value, context: &str) -> Vec<T> {
    let Value::Array(items) = value else {
        log::warn!("expected an array for {}, treating as empty", context);
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("skipping malformed {} item: {}", context, e);
                None
            }
        })
        .collect()
}
