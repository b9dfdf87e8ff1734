// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flock API Layer
//!
//! High-level API for the Flock social client library.
//!
//! # Overview
//!
//! The API layer provides typed resource clients over the authenticated
//! request client, coordinated by an orchestrator:
//! - Session management (login, verify, restore, logout)
//! - Feed, posts, comments, follow graph, profiles, map
//! - Chat REST bootstrap and chat manager construction
//!
//! # Example
//!
//! ```ignore
//! use flock_core::api::Flock;
//! use flock_core::config::ClientConfig;
//!
//! let mut flock = Flock::new(ClientConfig::from_env())?;
//! flock.login("ada", "hunter2")?;
//!
//! let posts = flock.feed().feed(20, 0)?;
//! println!("{} posts in feed", posts.len());
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Unified error type for the API layer
//! - [`models`] - Value records built from API payloads
//! - [`auth`] / [`users`] / [`follows`] / [`posts`] / [`comments`] /
//!   [`feed`] / [`map`] / [`chats`] - Resource clients
//! - [`flock`] - Main orchestrator

#[cfg(feature = "testing")]
pub mod auth;
#[cfg(not(feature = "testing"))]
mod auth;

#[cfg(feature = "testing")]
pub mod chats;
#[cfg(not(feature = "testing"))]
mod chats;

#[cfg(feature = "testing")]
pub mod comments;
#[cfg(not(feature = "testing"))]
mod comments;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod feed;
#[cfg(not(feature = "testing"))]
mod feed;

#[cfg(feature = "testing")]
pub mod flock;
#[cfg(not(feature = "testing"))]
mod flock;

#[cfg(feature = "testing")]
pub mod follows;
#[cfg(not(feature = "testing"))]
mod follows;

#[cfg(feature = "testing")]
pub mod map;
#[cfg(not(feature = "testing"))]
mod map;

#[cfg(feature = "testing")]
pub mod models;
#[cfg(not(feature = "testing"))]
mod models;

#[cfg(feature = "testing")]
pub mod posts;
#[cfg(not(feature = "testing"))]
mod posts;

#[cfg(feature = "testing")]
pub mod users;
#[cfg(not(feature = "testing"))]
mod users;

// Error types
pub use error::{FlockError, FlockResult};

// Value records
pub use models::{
    parse_list, AuthSession, ChatMessage, Comment, FollowEdge, LocationHit, Post, Profile, Reply,
    User,
};

// Resource clients
pub use auth::AuthClient;
pub use chats::ChatApiClient;
pub use comments::CommentClient;
pub use feed::FeedClient;
pub use follows::FollowClient;
pub use map::MapClient;
pub use posts::PostClient;
pub use users::UserClient;

// Orchestrator
pub use flock::{Flock, FlockBuilder};
