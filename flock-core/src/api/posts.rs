// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Posts Client
//!
//! Post CRUD, likes and saved posts against `/post` and `/saved`.

use serde_json::json;

use super::error::FlockResult;
use super::models::{parse_list, Post};
use crate::http::{ApiClient, HttpTransport};
use crate::storage::SecureStore;

/// Client for the `/post` and `/saved` resource groups.
pub struct PostClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
}

impl<'a, S: SecureStore, T: HttpTransport> PostClient<'a, S, T> {
    /// Creates a new PostClient.
    pub fn new(http: &'a ApiClient<S, T>) -> Self {
        PostClient { http }
    }

    /// Creates a post.
    pub fn create_post(&self, caption: &str, image_url: Option<&str>) -> FlockResult<Post> {
        let response = self.http.post(
            "/post",
            json!({ "caption": caption, "image_url": image_url }),
        )?;
        Ok(response.json()?)
    }

    /// Fetches a post by id.
    pub fn get_post(&self, post_id: &str) -> FlockResult<Post> {
        let response = self.http.get(&format!("/post/{}", post_id))?;
        Ok(response.json()?)
    }

    /// Posts authored by a user.
    pub fn posts_by_user(&self, user_id: &str) -> FlockResult<Vec<Post>> {
        let response = self.http.get(&format!("/post/user/{}", user_id))?;
        Ok(parse_list(response.value()?, "posts"))
    }

    /// Deletes a post.
    pub fn delete_post(&self, post_id: &str) -> FlockResult<()> {
        self.http.delete(&format!("/post/{}", post_id))?;
        Ok(())
    }

    /// Likes a post.
    pub fn add_like(&self, post_id: &str) -> FlockResult<()> {
        self.http
            .post(&format!("/post/{}/like", post_id), json!({}))?;
        Ok(())
    }

    /// Removes a like.
    pub fn remove_like(&self, post_id: &str) -> FlockResult<()> {
        self.http.delete(&format!("/post/{}/like", post_id))?;
        Ok(())
    }

    /// Toggles the like state optimistically.
    ///
    /// The local flags flip before the request goes out; on failure they are
    /// restored to exactly their prior values and the error is returned.
    pub fn toggle_like(&self, post: &mut Post) -> FlockResult<()> {
        let prior_liked = post.is_liked;
        let prior_count = post.likes_count;

        post.is_liked = !prior_liked;
        post.likes_count = if post.is_liked {
            prior_count + 1
        } else {
            prior_count.saturating_sub(1)
        };

        let result = if post.is_liked {
            self.add_like(&post.id)
        } else {
            self.remove_like(&post.id)
        };

        if let Err(e) = result {
            post.is_liked = prior_liked;
            post.likes_count = prior_count;
            return Err(e);
        }
        Ok(())
    }

    /// Saves a post to the user's saved collection.
    pub fn save_post(&self, post_id: &str) -> FlockResult<()> {
        self.http
            .post("/saved", json!({ "post_id": post_id }))?;
        Ok(())
    }

    /// Removes a post from the saved collection.
    pub fn unsave_post(&self, post_id: &str) -> FlockResult<()> {
        self.http.delete(&format!("/saved/{}", post_id))?;
        Ok(())
    }

    /// The user's saved posts.
    pub fn saved_posts(&self) -> FlockResult<Vec<Post>> {
        let response = self.http.get("/saved")?;
        Ok(parse_list(response.value()?, "saved posts"))
    }
}
