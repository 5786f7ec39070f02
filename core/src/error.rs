//! Error types and response normalization for the booking API client.
//!
//! # Design
//! Every non-2xx response is normalized into `ApiError::Api { status, message }`
//! so callers render one uniform shape no matter how the server formatted the
//! failure. The server is expected to send `{ "message": "..." }` bodies; when
//! it does not, a fallback message is synthesized, with 405 singled out because
//! it signals a client/server contract mismatch rather than anything the user
//! can correct.
//!
//! User-facing strings are Spanish, matching what the booking app ships.

use serde::Deserialize;
use thiserror::Error;

use crate::http::HttpResponse;

/// Fallback when the error body parses but carries no message field.
pub const GENERIC_ERROR: &str = "Error en la operación";

/// Fallback for an unreadable error body.
pub const CONNECTION_ERROR: &str = "Error de conexión con el servidor";

/// Distinct message for HTTP 405 with an unreadable body.
pub const METHOD_NOT_ALLOWED: &str =
    "Método no permitido. Por favor, contacta al soporte técnico.";

/// Shown for a 409 during registration, regardless of the response body.
pub const DUPLICATE_EMAIL: &str = "Este correo electrónico ya está registrado";

/// Errors returned by `BookingApi` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is the normalized
    /// human-readable text and `status` the original HTTP status code.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// The HTTP status carried by an `Api` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Shape of the JSON error body the server sends on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Normalize a non-2xx response into an `ApiError::Api`.
///
/// Tries the JSON `{ "message": ... }` body first; otherwise synthesizes a
/// message from the status code alone.
pub(crate) fn normalize(response: &HttpResponse) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(body) => body.message.unwrap_or_else(|| GENERIC_ERROR.to_string()),
        Err(_) if response.status == 405 => METHOD_NOT_ALLOWED.to_string(),
        Err(_) => CONNECTION_ERROR.to_string(),
    };
    ApiError::Api {
        status: response.status,
        message,
    }
}
