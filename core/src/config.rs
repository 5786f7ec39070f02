//! Base URL resolution.
//!
//! Resolved once at startup: `.env` (if present) is loaded, then the
//! `API_URL` environment variable is consulted, with a local-development
//! default.

/// Default API origin when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable naming the API origin.
pub const API_URL_VAR: &str = "API_URL";

/// Resolve the API base URL from the environment.
pub fn api_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env var mutations cannot race each other.
    #[test]
    fn env_var_overrides_default() {
        std::env::remove_var(API_URL_VAR);
        assert_eq!(api_url(), DEFAULT_API_URL);

        std::env::set_var(API_URL_VAR, "http://api.example.test:9000");
        assert_eq!(api_url(), "http://api.example.test:9000");
        std::env::remove_var(API_URL_VAR);
    }
}
