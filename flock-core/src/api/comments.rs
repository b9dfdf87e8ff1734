// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Comments Client
//!
//! Comments and replies against `/comment` and `/comment-replies`.

use serde_json::json;

use super::error::FlockResult;
use super::models::{parse_list, Comment, Reply};
use crate::http::{ApiClient, HttpTransport};
use crate::storage::SecureStore;

/// Client for the `/comment` and `/comment-replies` resource groups.
pub struct CommentClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
}

impl<'a, S: SecureStore, T: HttpTransport> CommentClient<'a, S, T> {
    /// Creates a new CommentClient.
    pub fn new(http: &'a ApiClient<S, T>) -> Self {
        CommentClient { http }
    }

    /// Comments on a post.
    pub fn comments_for_post(&self, post_id: &str) -> FlockResult<Vec<Comment>> {
        let response = self.http.get(&format!("/comment/post/{}", post_id))?;
        Ok(parse_list(response.value()?, "comments"))
    }

    /// Adds a comment to a post.
    pub fn add_comment(&self, post_id: &str, text: &str) -> FlockResult<Comment> {
        let response = self.http.post(
            "/comment",
            json!({ "post_id": post_id, "text": text }),
        )?;
        Ok(response.json()?)
    }

    /// Deletes a comment.
    pub fn delete_comment(&self, comment_id: &str) -> FlockResult<()> {
        self.http.delete(&format!("/comment/{}", comment_id))?;
        Ok(())
    }

    /// Toggles the like state of a comment optimistically, restoring the
    /// prior values on failure.
    pub fn toggle_like(&self, comment: &mut Comment) -> FlockResult<()> {
        let prior_liked = comment.is_liked;
        let prior_count = comment.likes_count;

        comment.is_liked = !prior_liked;
        comment.likes_count = if comment.is_liked {
            prior_count + 1
        } else {
            prior_count.saturating_sub(1)
        };

        let result = if comment.is_liked {
            self.http
                .post(&format!("/comment/{}/like", comment.id), json!({}))
                .map(|_| ())
        } else {
            self.http
                .delete(&format!("/comment/{}/like", comment.id))
                .map(|_| ())
        };

        if let Err(e) = result {
            comment.is_liked = prior_liked;
            comment.likes_count = prior_count;
            return Err(e.into());
        }
        Ok(())
    }

    /// Replies to a comment.
    pub fn replies(&self, comment_id: &str) -> FlockResult<Vec<Reply>> {
        let response = self
            .http
            .get(&format!("/comment-replies/{}", comment_id))?;
        Ok(parse_list(response.value()?, "replies"))
    }

    /// Adds a reply to a comment.
    pub fn add_reply(&self, comment_id: &str, text: &str) -> FlockResult<Reply> {
        let response = self.http.post(
            "/comment-replies",
            json!({ "comment_id": comment_id, "text": text }),
        )?;
        Ok(response.json()?)
    }
}
