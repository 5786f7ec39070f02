//! Space catalogue and availability pre-check.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{self, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Availability, Space};

use super::BookingApi;

impl BookingApi {
    /// GET `/spaces`.
    pub fn build_list_spaces(&self) -> HttpRequest {
        self.get("/spaces")
    }

    pub fn parse_list_spaces(&self, response: HttpResponse) -> Result<Vec<Space>, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// GET `/spaces/{id}/availability` for a time range.
    ///
    /// Advisory only: the answer can be stale by the time a booking is
    /// created, and the creation-time conflict check is authoritative.
    pub fn build_check_availability(
        &self,
        space_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/spaces/{space_id}/availability", self.base_url),
            query: vec![
                ("start_time".to_string(), start_time.to_rfc3339()),
                ("end_time".to_string(), end_time.to_rfc3339()),
            ],
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_check_availability(&self, response: HttpResponse) -> Result<bool, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        let availability: Availability = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(availability.available)
    }
}
