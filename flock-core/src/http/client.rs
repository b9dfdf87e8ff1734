// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authenticated Request Client
//!
//! Wraps an [`HttpTransport`] with bearer-token injection and a
//! single-retry-after-refresh policy on authorization failure.

use serde_json::json;

use super::error::HttpError;
use super::transport::{HttpRequest, HttpResponse, HttpResult, HttpTransport};
use crate::storage::{SecureStore, TokenStore};

/// Shape of a successful `/auth/refresh` response.
#[derive(serde::Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Authenticated request client.
///
/// Policy, in order: attach the stored bearer token; issue the request once;
/// on HTTP 401 run one refresh against `/auth/refresh`, overwrite the stored
/// access token, and retry exactly once. A second 401 propagates. There is
/// no request queueing, no backoff, and no coalescing of concurrent
/// refreshes; each caller refreshes independently.
pub struct ApiClient<S: SecureStore, T: HttpTransport> {
    transport: T,
    tokens: TokenStore<S>,
}

impl<S: SecureStore, T: HttpTransport> ApiClient<S, T> {
    /// Creates a request client over a transport and token store.
    pub fn new(transport: T, tokens: TokenStore<S>) -> Self {
        ApiClient { transport, tokens }
    }

    /// Returns the token store.
    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes a request with the authentication policy applied.
    ///
    /// Non-2xx responses surface as [`HttpError::Status`] carrying the
    /// server's `detail` message when one was sent.
    pub fn request(&self, mut request: HttpRequest) -> HttpResult<HttpResponse> {
        if request.requires_auth {
            request.bearer = self.tokens.access_token()?;
        }

        let response = self.transport.execute(&request)?;
        if response.status != 401 || !request.requires_auth {
            return Self::finalize(response);
        }

        // One refresh, then one retry. A second 401 falls through finalize.
        let access = self.refresh()?;
        request.bearer = Some(access);
        let retried = self.transport.execute(&request)?;
        Self::finalize(retried)
    }

    /// Convenience wrapper for GET.
    pub fn get(&self, path: &str) -> HttpResult<HttpResponse> {
        self.request(HttpRequest::get(path))
    }

    /// Convenience wrapper for POST with a JSON body.
    pub fn post(&self, path: &str, body: serde_json::Value) -> HttpResult<HttpResponse> {
        self.request(HttpRequest::post(path).json(body))
    }

    /// Convenience wrapper for PUT with a JSON body.
    pub fn put(&self, path: &str, body: serde_json::Value) -> HttpResult<HttpResponse> {
        self.request(HttpRequest::put(path).json(body))
    }

    /// Convenience wrapper for DELETE.
    pub fn delete(&self, path: &str) -> HttpResult<HttpResponse> {
        self.request(HttpRequest::delete(path))
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// On success the new access token (and a rotated refresh token, if the
    /// server sent one) overwrites the token store.
    fn refresh(&self) -> HttpResult<String> {
        let refresh = self
            .tokens
            .refresh_token()?
            .ok_or(HttpError::Unauthorized)?;

        let request = HttpRequest::post("/auth/refresh")
            .json(json!({ "refresh_token": refresh }))
            .unauthenticated();

        let response = self.transport.execute(&request)?;
        if !response.is_success() {
            log::warn!("token refresh rejected with status {}", response.status);
            return Err(HttpError::Unauthorized);
        }

        let parsed: RefreshResponse = response.json()?;
        self.tokens.set_access_token(&parsed.access_token)?;
        if let Some(rotated) = &parsed.refresh_token {
            self.tokens.set_refresh_token(rotated)?;
        }

        Ok(parsed.access_token)
    }

    fn finalize(response: HttpResponse) -> HttpResult<HttpResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(HttpError::Status {
                status: response.status,
                detail: response.detail(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::mock::MockHttp;
    use crate::storage::{MemoryStore, Tokens};

    fn create_client(mock: MockHttp) -> ApiClient<MemoryStore, MockHttp> {
        let tokens = TokenStore::new(MemoryStore::new(), &ClientConfig::default());
        tokens
            .set(&Tokens {
                access: "old-access".into(),
                refresh: "refresh-1".into(),
            })
            .unwrap();
        ApiClient::new(mock, tokens)
    }

    #[test]
    fn test_attaches_bearer_token() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::empty(200));
        let client = create_client(mock);

        client.get("/feed").unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent[0].bearer, Some("old-access".to_string()));
    }

    #[test]
    fn test_skips_bearer_for_unauthenticated() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::empty(200));
        let client = create_client(mock);

        client
            .request(HttpRequest::post("/auth/login").unauthenticated())
            .unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent[0].bearer, None);
    }

    #[test]
    fn test_401_triggers_one_refresh_and_one_retry() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::empty(401));
        mock.push_response(HttpResponse::json_body(
            200,
            serde_json::json!({"access_token": "new-access"}),
        ));
        mock.push_response(HttpResponse::empty(200));
        let client = create_client(mock);

        client.get("/feed").unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].path, "/auth/refresh");
        assert!(!sent[1].requires_auth);
        // Retry carries the refreshed token
        assert_eq!(sent[2].path, "/feed");
        assert_eq!(sent[2].bearer, Some("new-access".to_string()));
        // Store was overwritten
        assert_eq!(
            client.tokens().access_token().unwrap(),
            Some("new-access".to_string())
        );
    }

    #[test]
    fn test_second_401_propagates_without_looping() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::empty(401));
        mock.push_response(HttpResponse::json_body(
            200,
            serde_json::json!({"access_token": "new-access"}),
        ));
        mock.push_response(HttpResponse::empty(401));
        let client = create_client(mock);

        let result = client.get("/feed");

        assert!(matches!(
            result,
            Err(HttpError::Status { status: 401, .. })
        ));
        // Exactly one refresh, exactly one retry, no loop
        assert_eq!(client.transport().count_for_path("/auth/refresh"), 1);
        assert_eq!(client.transport().count_for_path("/feed"), 2);
    }

    #[test]
    fn test_failed_refresh_propagates_unauthorized() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::empty(401));
        mock.push_response(HttpResponse::empty(401)); // refresh itself rejected
        let client = create_client(mock);

        let result = client.get("/feed");

        assert!(matches!(result, Err(HttpError::Unauthorized)));
        // Original request was never retried
        assert_eq!(client.transport().count_for_path("/feed"), 1);
    }

    #[test]
    fn test_401_without_refresh_token_is_unauthorized() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::empty(401));
        let tokens = TokenStore::new(MemoryStore::new(), &ClientConfig::default());
        tokens.set_access_token("stale").unwrap();
        let client = ApiClient::new(mock, tokens);

        let result = client.get("/feed");
        assert!(matches!(result, Err(HttpError::Unauthorized)));
    }

    #[test]
    fn test_rotated_refresh_token_is_stored() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::empty(401));
        mock.push_response(HttpResponse::json_body(
            200,
            serde_json::json!({"access_token": "new-access", "refresh_token": "refresh-2"}),
        ));
        mock.push_response(HttpResponse::empty(200));
        let client = create_client(mock);

        client.get("/feed").unwrap();

        assert_eq!(
            client.tokens().refresh_token().unwrap(),
            Some("refresh-2".to_string())
        );
    }

    #[test]
    fn test_non_401_error_is_not_retried() {
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::json_body(
            500,
            serde_json::json!({"detail": "boom"}),
        ));
        let client = create_client(mock);

        let result = client.get("/feed");

        assert!(matches!(
            result,
            Err(HttpError::Status { status: 500, .. })
        ));
        assert_eq!(client.transport().request_count(), 1);
    }

    #[test]
    fn test_unauthenticated_401_is_not_refreshed() {
        // A failed login is a plain status error, not a refresh trigger
        let mock = MockHttp::new();
        mock.push_response(HttpResponse::json_body(
            401,
            serde_json::json!({"detail": "Bad credentials"}),
        ));
        let client = create_client(mock);

        let result = client.request(HttpRequest::post("/auth/login").unauthenticated());

        assert!(matches!(
            result,
            Err(HttpError::Status { status: 401, .. })
        ));
        assert_eq!(client.transport().request_count(), 1);
    }
}
