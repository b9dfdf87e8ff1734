// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Users Client
//!
//! Profile fetch/update and user search against `/users`.

use serde_json::json;

use super::error::FlockResult;
use super::models::{parse_list, Profile, User};
use crate::http::{ApiClient, HttpRequest, HttpTransport};
use crate::storage::SecureStore;

/// Client for the `/users` resource group.
pub struct UserClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
}

impl<'a, S: SecureStore, T: HttpTransport> UserClient<'a, S, T> {
    /// Creates a new UserClient.
    pub fn new(http: &'a ApiClient<S, T>) -> Self {
        UserClient { http }
    }

    /// Fetches the authenticated user's own profile.
    pub fn me(&self) -> FlockResult<Profile> {
        let response = self.http.get("/users/me")?;
        Ok(response.json()?)
    }

    /// Fetches a profile by user id.
    pub fn get_profile(&self, user_id: &str) -> FlockResult<Profile> {
        let response = self.http.get(&format!("/users/{}", user_id))?;
        Ok(response.json()?)
    }

    /// Updates the authenticated user's profile fields.
    pub fn update_profile(
        &self,
        bio: Option<&str>,
        avatar_url: Option<&str>,
    ) -> FlockResult<Profile> {
        let response = self.http.put(
            "/users/me",
            json!({ "bio": bio, "avatar_url": avatar_url }),
        )?;
        Ok(response.json()?)
    }

    /// Searches users by username prefix.
    pub fn search(&self, query: &str) -> FlockResult<Vec<User>> {
        let response = self
            .http
            .request(HttpRequest::get("/users/search").query("q", query))?;
        Ok(parse_list(response.value()?, "users"))
    }
}
