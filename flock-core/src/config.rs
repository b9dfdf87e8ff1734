// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Configuration
//!
//! All endpoints and key names are externally supplied: the library has no
//! baked-in server addresses. `from_env` reads the same variables the host
//! app injects at build time.

/// Configuration for a Flock client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API (e.g. `https://api.example.com`).
    pub api_base_url: String,
    /// Base URL of the WebSocket endpoint (e.g. `wss://api.example.com`).
    pub ws_base_url: String,
    /// Service name used for keychain entries.
    pub keyring_service: String,
    /// Key name under which the access token is stored.
    pub access_token_key: String,
    /// Key name under which the refresh token is stored.
    pub refresh_token_key: String,
    /// External location-lookup API endpoint.
    pub location_api_url: String,
    /// API key for the location-lookup endpoint.
    pub location_api_key: String,
    /// HTTP request timeout in milliseconds.
    pub http_timeout_ms: u64,
    /// WebSocket connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// WebSocket read/write timeout in milliseconds. Bounds how long a
    /// single `pump` call may block waiting for a frame.
    pub io_timeout_ms: u64,
    /// Ping frame interval while a chat socket is open.
    pub ping_interval_ms: u64,
    /// Window after which an unrefreshed typing indicator auto-clears.
    pub typing_timeout_ms: u64,
    /// Fixed delay between reconnect attempts.
    pub reconnect_delay_ms: u64,
    /// Maximum reconnect attempts after an abnormal close.
    pub max_reconnect_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: String::new(),
            ws_base_url: String::new(),
            keyring_service: "flock".to_string(),
            access_token_key: "flock_access_token".to_string(),
            refresh_token_key: "flock_refresh_token".to_string(),
            location_api_url: String::new(),
            location_api_key: String::new(),
            http_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            io_timeout_ms: 1_000,
            ping_interval_ms: 30_000,
            typing_timeout_ms: 3_000,
            reconnect_delay_ms: 3_000,
            max_reconnect_attempts: 5,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the given API and WebSocket base URLs.
    pub fn new(api_base_url: &str, ws_base_url: &str) -> Self {
        ClientConfig {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            ws_base_url: ws_base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Builds a config from environment variables.
    ///
    /// Reads `FLOCK_API_URL`, `FLOCK_WS_URL`, `FLOCK_LOCATION_API_URL` and
    /// `FLOCK_LOCATION_API_KEY`. Missing variables leave the corresponding
    /// field at its default.
    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();
        if let Ok(url) = std::env::var("FLOCK_API_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(url) = std::env::var("FLOCK_WS_URL") {
            config.ws_base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(url) = std::env::var("FLOCK_LOCATION_API_URL") {
            config.location_api_url = url;
        }
        if let Ok(key) = std::env::var("FLOCK_LOCATION_API_KEY") {
            config.location_api_key = key;
        }
        config
    }
}
