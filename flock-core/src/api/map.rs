// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Map Client
//!
//! Nearby users against `/map`, plus forward geocoding through the external
//! location-lookup API configured by the host.

use super::error::FlockResult;
use super::models::{parse_list, LocationHit, User};
use crate::config::ClientConfig;
use crate::http::{ApiClient, HttpRequest, HttpTransport};
use crate::storage::SecureStore;

/// Client for the `/map` resource group and the location-lookup API.
pub struct MapClient<'a, S: SecureStore, T: HttpTransport> {
    http: &'a ApiClient<S, T>,
    location_api_url: String,
    location_api_key: String,
}

impl<'a, S: SecureStore, T: HttpTransport> MapClient<'a, S, T> {
    /// Creates a new MapClient.
    pub fn new(http: &'a ApiClient<S, T>, config: &ClientConfig) -> Self {
        MapClient {
            http,
            location_api_url: config.location_api_url.clone(),
            location_api_key: config.location_api_key.clone(),
        }
    }

    /// Users near a coordinate.
    pub fn nearby_users(&self, lat: f64, lon: f64, radius_km: u32) -> FlockResult<Vec<User>> {
        let response = self.http.request(
            HttpRequest::get("/map/nearby")
                .query("lat", lat)
                .query("lon", lon)
                .query("radius", radius_km),
        )?;
        Ok(parse_list(response.value()?, "nearby users"))
    }

    /// Forward-geocodes a free-form query through the external location API.
    ///
    /// The endpoint and key are host-supplied configuration; the request
    /// bypasses bearer auth since it targets a different service.
    pub fn lookup_location(&self, query: &str) -> FlockResult<Vec<LocationHit>> {
        let response = self.http.request(
            HttpRequest::get(&self.location_api_url)
                .query("q", query)
                .query("key", &self.location_api_key)
                .query("format", "json")
                .unauthenticated(),
        )?;
        Ok(parse_list(response.value()?, "location hits"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockHttp};
    use crate::storage::{MemoryStore, TokenStore, Tokens};
    use serde_json::json;

    fn create_config() -> ClientConfig {
        let mut config = ClientConfig::new("https://api.test", "wss://api.test");
        config.location_api_url = "https://geo.test/v1/search".into();
        config.location_api_key = "geo-key".into();
        config
    }

    fn create_client() -> ApiClient<MemoryStore, MockHttp> {
        let tokens = TokenStore::new(MemoryStore::new(), &create_config());
        tokens
            .set(&Tokens {
                access: "a".into(),
                refresh: "r".into(),
            })
            .unwrap();
        ApiClient::new(MockHttp::new(), tokens)
    }

    #[test]
    fn test_lookup_location_targets_external_api() {
        let config = create_config();
        let client = create_client();
        client.transport().push_response(HttpResponse::json_body(
            200,
            json!([{"display_name": "Bern, Switzerland", "lat": 46.948, "lon": 7.447}]),
        ));

        let hits = MapClient::new(&client, &config)
            .lookup_location("bern")
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name, "Bern, Switzerland");

        let sent = client.transport().requests();
        assert_eq!(sent[0].path, "https://geo.test/v1/search");
        assert!(!sent[0].requires_auth);
        assert!(sent[0]
            .query
            .contains(&("key".to_string(), "geo-key".to_string())));
    }

    #[test]
    fn test_nearby_users_query() {
        let config = create_config();
        let client = create_client();
        client
            .transport()
            .push_response(HttpResponse::json_body(200, json!([])));

        MapClient::new(&client, &config)
            .nearby_users(46.9, 7.4, 5)
            .unwrap();

        assert_eq!(client.transport().requests()[0].path, "/map/nearby");
    }
}
