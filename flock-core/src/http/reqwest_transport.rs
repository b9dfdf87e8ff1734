// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reqwest Transport
//!
//! Real HTTP transport backed by a blocking reqwest client.

use std::time::Duration;

use super::error::HttpError;
use super::transport::{HttpRequest, HttpResponse, HttpResult, HttpTransport, Method};
use crate::config::ClientConfig;

/// HTTP transport backed by `reqwest::blocking`.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport from the client config.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .user_agent(format!(
                "Flock/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ))
            .build()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        Ok(ReqwestTransport {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves a request path against the base URL. Absolute URLs pass
    /// through untouched (the location-lookup API lives on another host).
    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base_url, path)
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> HttpResult<HttpResponse> {
        let url = self.resolve_url(&request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(bearer) = &request.bearer {
            builder = builder.bearer_auth(bearer);
        }

        let response = builder
            .send()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| HttpError::Network(e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_joins_base() {
        let config = ClientConfig::new("https://api.example.com", "wss://api.example.com");
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(
            transport.resolve_url("/feed"),
            "https://api.example.com/feed"
        );
    }

    #[test]
    fn test_resolve_url_passes_absolute_through() {
        let config = ClientConfig::new("https://api.example.com", "wss://api.example.com");
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(
            transport.resolve_url("https://geo.example.com/lookup"),
            "https://geo.example.com/lookup"
        );
    }
}
