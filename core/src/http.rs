//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This separation keeps the core deterministic and easy to
//! test: every request the client would send can be asserted on directly.
//!
//! Query parameters stay structured as pairs rather than being spliced into
//! the URL, so percent-encoding is the executor's concern (ISO-8601
//! timestamps carry `:` and `+` and must be encoded by the transport).

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `BookingApi::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `BookingApi::parse_*` methods for status interpretation and
/// deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status falls in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_whole_2xx_range() {
        for status in [200, 201, 204, 299] {
            let resp = HttpResponse {
                status,
                headers: Vec::new(),
                body: String::new(),
            };
            assert!(resp.is_success(), "{status} should be success");
        }
    }

    #[test]
    fn non_2xx_is_not_success() {
        for status in [199, 301, 400, 401, 405, 409, 500] {
            let resp = HttpResponse {
                status,
                headers: Vec::new(),
                body: String::new(),
            };
            assert!(!resp.is_success(), "{status} should not be success");
        }
    }
}
