//! Login, registration, logout and session check.
//!
//! These are the only operations that write to the session store: a parsed
//! login/registration stores the returned token, logout and an invalid
//! session check clear it.

use crate::error::{self, ApiError, DUPLICATE_EMAIL};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AuthResponse, Credentials, Registration, Session};

use super::BookingApi;

impl BookingApi {
    /// POST `/auth/login` with the credentials as query parameters.
    pub fn build_login(&self, credentials: &Credentials) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/auth/login", self.base_url),
            query: vec![
                ("email".to_string(), credentials.email.clone()),
                ("password".to_string(), credentials.password.clone()),
            ],
            headers: self.headers(false),
            body: None,
        }
    }

    /// On success, stores the returned token and hands back the payload.
    /// Failures are normalized; the client never retries.
    pub fn parse_login(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        let auth: AuthResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        self.session.set_token(Some(&auth.access_token));
        Ok(auth)
    }

    /// POST `/auth/register` with the fields duplicated as query parameters
    /// and JSON body, tolerating either server-side extraction strategy.
    pub fn build_register(&self, registration: &Registration) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(registration)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/auth/register", self.base_url),
            query: vec![
                ("email".to_string(), registration.email.clone()),
                ("password".to_string(), registration.password.clone()),
                ("full_name".to_string(), registration.full_name.clone()),
            ],
            headers: self.headers(true),
            body: Some(body),
        })
    }

    /// Like `parse_login`, except a 409 always surfaces the duplicate-email
    /// message, overriding whatever the body says.
    pub fn parse_register(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        if response.status == 409 {
            return Err(ApiError::Api {
                status: 409,
                message: DUPLICATE_EMAIL.to_string(),
            });
        }
        self.parse_login(response)
    }

    /// POST `/auth/logout` to invalidate the session server-side.
    pub fn build_logout(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/auth/logout", self.base_url),
            query: Vec::new(),
            headers: self.headers(true),
            body: None,
        }
    }

    /// Complete a logout: best-effort remote, guaranteed local.
    ///
    /// Pass `None` when the round-trip itself failed. Whatever happened
    /// remotely, the local token is cleared and nothing is raised — a network
    /// failure must never leave a stale token usable. Safe to call twice.
    pub fn finish_logout(&self, response: Option<HttpResponse>) {
        match response {
            Some(resp) if resp.is_success() => {}
            Some(resp) => {
                tracing::warn!(status = resp.status, "logout rejected by server; clearing local session anyway");
            }
            None => {
                tracing::warn!("logout request failed; clearing local session anyway");
            }
        }
        self.session.set_token(None);
    }

    /// GET `/auth/session`, or `None` when no token is held — in that case
    /// there is no session and no network call is needed.
    pub fn build_session(&self) -> Option<HttpRequest> {
        self.session.token()?;
        Some(HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/auth/session", self.base_url),
            query: Vec::new(),
            headers: self.headers(true),
            body: None,
        })
    }

    /// Interpret a session check.
    ///
    /// A 401 means the token is definitely invalid: it is cleared and there
    /// is no session. Any other failure is treated as transient — no session
    /// is reported but the token is kept for a later retry. An unreadable
    /// success body also ends the session.
    pub fn parse_session(&self, response: HttpResponse) -> Option<Session> {
        if !response.is_success() {
            if response.status == 401 {
                self.session.set_token(None);
            }
            return None;
        }
        match serde_json::from_str(&response.body) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable session payload; ending session");
                self.session.set_token(None);
                None
            }
        }
    }
}
