// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feed Client
//!
//! The ranked home feed against `/feed`. Ranking is entirely server-side;
//! the client only pages through it.

use super::error::FlockResult;
use super::models::{parse_list, Post};
use crate::http::{ApiClient, HttpRequest, HttpTransport};
use crate::storage::SecureStore;

/// Client for the `/feed` resource group.
pub struct FeedClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
}

impl<'a, S: SecureStore, T: HttpTransport> FeedClient<'a, S, T> {
    /// Creates a new FeedClient.
    pub fn new(http: &'a ApiClient<S, T>) -> Self {
        FeedClient { http }
    }

    /// Fetches one page of the home feed.
    pub fn feed(&self, limit: u32, offset: u32) -> FlockResult<Vec<Post>> {
        let response = self.http.request(
            HttpRequest::get("/feed")
                .query("limit", limit)
                .query("offset", offset),
        )?;
        Ok(parse_list(response.value()?, "feed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::{HttpResponse, MockHttp};
    use crate::storage::{MemoryStore, TokenStore, Tokens};
    use serde_json::json;

    fn create_client() -> ApiClient<MemoryStore, MockHttp> {
        let tokens = TokenStore::new(MemoryStore::new(), &ClientConfig::default());
        tokens
            .set(&Tokens {
                access: "a".into(),
                refresh: "r".into(),
            })
            .unwrap();
        ApiClient::new(MockHttp::new(), tokens)
    }

    #[test]
    fn test_feed_page_query() {
        let client = create_client();
        client.transport().push_response(HttpResponse::json_body(
            200,
            json!([{
                "id": "p1",
                "author": {"id": "u2", "username": "grace"},
                "caption": "hello",
                "created_at": 1000
            }]),
        ));

        let posts = FeedClient::new(&client).feed(20, 40).unwrap();

        assert_eq!(posts.len(), 1);
        let sent = client.transport().requests();
        assert_eq!(sent[0].path, "/feed");
        assert!(sent[0]
            .query
            .contains(&("limit".to_string(), "20".to_string())));
        assert!(sent[0]
            .query
            .contains(&("offset".to_string(), "40".to_string())));
    }

    #[test]
    fn test_feed_malformed_payload_is_empty() {
        let client = create_client();
        client
            .transport()
            .push_response(HttpResponse::json_body(200, json!({"posts": []})));

        let posts = FeedClient::new(&client).feed(20, 0).unwrap();
        assert!(posts.is_empty());
    }
}
