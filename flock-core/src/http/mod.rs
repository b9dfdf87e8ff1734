// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP Layer
//!
//! Authenticated request client over a transport abstraction.
//!
//! # Architecture
//!
//! - **Transport trait**: moves a request and returns a raw response
//! - **Reqwest transport**: production implementation (blocking reqwest)
//! - **Mock transport**: scripted responses for tests
//! - **Request client**: bearer injection + single refresh-and-retry on 401
//!
//! # Example
//!
//! ```ignore
//! use flock_core::http::{ApiClient, ReqwestTransport};
//! use flock_core::storage::{MemoryStore, TokenStore};
//!
//! let transport = ReqwestTransport::new(&config)?;
//! let tokens = TokenStore::new(MemoryStore::new(), &config);
//! let client = ApiClient::new(transport, tokens);
//!
//! let response = client.get("/feed")?;
//! ```

#[cfg(feature = "testing")]
pub mod client;
#[cfg(not(feature = "testing"))]
mod client;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod mock;
#[cfg(not(feature = "testing"))]
mod mock;

#[cfg(feature = "testing")]
pub mod reqwest_transport;
#[cfg(not(feature = "testing"))]
mod reqwest_transport;

#[cfg(feature = "testing")]
pub mod transport;
#[cfg(not(feature = "testing"))]
mod transport;

// Error types
pub use error::{HttpError, GENERIC_ERROR_MESSAGE};

// Transport abstraction
pub use transport::{HttpRequest, HttpResponse, HttpResult, HttpTransport, Method};

// Production transport
pub use reqwest_transport::ReqwestTransport;

// Mock transport for testing
pub use mock::MockHttp;

// Authenticated request client
pub use client::ApiClient;
