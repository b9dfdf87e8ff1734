// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock HTTP Transport
//!
//! Scripted transport for exercising the request client in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::error::HttpError;
use super::transport::{HttpRequest, HttpResponse, HttpResult, HttpTransport};

/// Mock transport returning scripted responses in order.
///
/// Every executed request is recorded so tests can assert on what was sent
/// (paths, retry counts, bearer tokens).
#[derive(Default)]
pub struct MockHttp {
    responses: Mutex<VecDeque<HttpResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response to return.
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queues a transport-level failure.
    pub fn push_error(&self, error: HttpError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Returns a copy of every request executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of executed requests whose path matches `path`.
    pub fn count_for_path(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

impl HttpTransport for MockHttp {
    fn execute(&self, request: &HttpRequest) -> HttpResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(HttpError::Network(
                    "MockHttp: no scripted response left".into(),
                ))
            })
    }
}
