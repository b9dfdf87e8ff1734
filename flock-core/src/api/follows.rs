// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Follows Client
//!
//! Follow graph operations against `/followers`.

use serde_json::json;

use super::error::FlockResult;
use super::models::{parse_list, FollowEdge};
use crate::http::{ApiClient, HttpTransport};
use crate::storage::SecureStore;

/// Client for the `/followers` resource group.
pub struct FollowClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
}

impl<'a, S: SecureStore, T: HttpTransport> FollowClient<'a, S, T> {
    /// Creates a new FollowClient.
    pub fn new(http: &'a ApiClient<S, T>) -> Self {
        FollowClient { http }
    }

    /// Users following `user_id`.
    pub fn followers(&self, user_id: &str) -> FlockResult<Vec<FollowEdge>> {
        let response = self.http.get(&format!("/followers/{}", user_id))?;
        Ok(parse_list(response.value()?, "followers"))
    }

    /// Users that `user_id` follows.
    pub fn following(&self, user_id: &str) -> FlockResult<Vec<FollowEdge>> {
        let response = self
            .http
            .get(&format!("/followers/{}/following", user_id))?;
        Ok(parse_list(response.value()?, "following"))
    }

    /// Follows a user.
    pub fn follow(&self, user_id: &str) -> FlockResult<()> {
        self.http
            .post("/followers", json!({ "user_id": user_id }))?;
        Ok(())
    }

    /// Unfollows a user.
    pub fn unfollow(&self, user_id: &str) -> FlockResult<()> {
        self.http.delete(&format!("/followers/{}", user_id))?;
        Ok(())
    }
}
