//! Request builder and response parser for the booking API.
//!
//! # Design
//! `BookingApi` holds the base URL and an injected [`SessionStore`]; it carries
//! no other state between calls. Each resource operation is split into a
//! `build_*` method that produces an [`HttpRequest`] and a `parse_*` method
//! that consumes an [`HttpResponse`]. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of I/O dependencies.
//!
//! Operations are grouped by resource: [`auth`], [`spaces`], [`bookings`] and
//! [`dashboard`]. The auth parse methods are the only ones that write to the
//! session store; everything else only reads the token when attaching the
//! `Authorization` header.
//!
//! There is no retry, backoff or cancellation here, and no ordering across
//! independent requests: two in-flight operations may resolve out of order,
//! and a token read before a round-trip may be invalidated before the
//! response lands. Callers must treat a 401 on any authenticated call as
//! "session has ended".

mod auth;
mod bookings;
mod dashboard;
mod spaces;

use crate::config;
use crate::http::{HttpMethod, HttpRequest};
use crate::session::SessionStore;

/// Client for the coworking booking API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
pub struct BookingApi {
    base_url: String,
    session: SessionStore,
}

impl BookingApi {
    pub fn new(base_url: &str, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Client against the environment-configured base URL.
    pub fn from_env(session: SessionStore) -> Self {
        Self::new(&config::api_url(), session)
    }

    /// The session store backing this client.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Shared header set: JSON in and out, plus a bearer token when the
    /// operation is authenticated and a token is held. A missing token omits
    /// the header rather than failing locally; rejecting unauthenticated
    /// calls is the server's job.
    fn headers(&self, include_auth: bool) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        if include_auth {
            if let Some(token) = self.session.token() {
                headers.push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }
        headers
    }

    /// Authenticated GET with no body, the shape most read operations share.
    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: self.headers(true),
            body: None,
        }
    }
}

impl std::fmt::Debug for BookingApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingApi")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
