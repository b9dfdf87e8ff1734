// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Auth Client
//!
//! Registration, login, verification and logout against `/auth`. Login and
//! registration are the only operations that write the token store; logout
//! clears it.

use serde_json::json;

use super::error::FlockResult;
use super::models::{AuthSession, User};
use crate::http::{ApiClient, HttpRequest, HttpTransport};
use crate::storage::{SecureStore, Tokens};

/// Client for the `/auth` resource group.
pub struct AuthClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
}

impl<'a, S: SecureStore, T: HttpTransport> AuthClient<'a, S, T> {
    /// Creates a new AuthClient.
    pub fn new(http: &'a ApiClient<S, T>) -> Self {
        AuthClient { http }
    }

    /// Registers a new account. The server sends a verification code
    /// out-of-band; the session starts after [`Self::verify`].
    pub fn register(&self, username: &str, email: &str, password: &str) -> FlockResult<()> {
        self.http.request(
            HttpRequest::post("/auth/register")
                .json(json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }))
                .unauthenticated(),
        )?;
        Ok(())
    }

    /// Confirms the emailed verification code and stores the session tokens.
    pub fn verify(&self, email: &str, code: &str) -> FlockResult<User> {
        let response = self.http.request(
            HttpRequest::post("/auth/verify")
                .json(json!({ "email": email, "code": code }))
                .unauthenticated(),
        )?;

        let session: AuthSession = response.json()?;
        self.store_session(&session)?;
        Ok(session.user)
    }

    /// Logs in and stores the session tokens.
    pub fn login(&self, username: &str, password: &str) -> FlockResult<User> {
        let response = self.http.request(
            HttpRequest::post("/auth/login")
                .json(json!({ "username": username, "password": password }))
                .unauthenticated(),
        )?;

        let session: AuthSession = response.json()?;
        self.store_session(&session)?;
        Ok(session.user)
    }

    /// Ends the session. The server call is best-effort; the local tokens
    /// are cleared regardless.
    pub fn logout(&self) -> FlockResult<()> {
        let _ = self.http.post("/auth/logout", json!({}));
        self.http.tokens().clear()?;
        Ok(())
    }

    fn store_session(&self, session: &AuthSession) -> FlockResult<()> {
        self.http.tokens().set(&Tokens {
            access: session.access_token.clone(),
            refresh: session.refresh_token.clone(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::{HttpResponse, MockHttp};
    use crate::storage::{MemoryStore, TokenStore};
    use serde_json::json;

    fn create_client() -> ApiClient<MemoryStore, MockHttp> {
        let tokens = TokenStore::new(MemoryStore::new(), &ClientConfig::default());
        ApiClient::new(MockHttp::new(), tokens)
    }

    #[test]
    fn test_login_stores_tokens() {
        let client = create_client();
        client.transport().push_response(HttpResponse::json_body(
            200,
            json!({
                "access_token": "a1",
                "refresh_token": "r1",
                "user": {"id": "u1", "username": "ada"}
            }),
        ));

        let user = AuthClient::new(&client).login("ada", "pw").unwrap();

        assert_eq!(user.username, "ada");
        let stored = client.tokens().tokens().unwrap().unwrap();
        assert_eq!(stored.access, "a1");
        assert_eq!(stored.refresh, "r1");

        // Login itself carries no bearer token
        assert!(!client.transport().requests()[0].requires_auth);
    }

    #[test]
    fn test_failed_login_leaves_store_empty() {
        let client = create_client();
        client.transport().push_response(HttpResponse::json_body(
            401,
            json!({"detail": "Bad credentials"}),
        ));

        let result = AuthClient::new(&client).login("ada", "wrong");

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().user_message(), "Bad credentials");
        assert!(client.tokens().tokens().unwrap().is_none());
    }

    #[test]
    fn test_logout_clears_tokens_even_if_server_fails() {
        let client = create_client();
        client
            .tokens()
            .set(&Tokens {
                access: "a".into(),
                refresh: "r".into(),
            })
            .unwrap();
        client
            .transport()
            .push_response(HttpResponse::empty(500));

        AuthClient::new(&client).logout().unwrap();

        assert!(client.tokens().tokens().unwrap().is_none());
    }
}
