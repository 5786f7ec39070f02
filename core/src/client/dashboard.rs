//! Read-only dashboard aggregates.
//!
//! Each view is fetched and fails independently; whether one failure sinks
//! the whole dashboard or leaves a partial render is the caller's decision.

use crate::error::{self, ApiError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{DashboardMetrics, HourlyStats, SpaceStats, StatusStats};

use super::BookingApi;

impl BookingApi {
    /// GET `/dashboard/space-stats` — bookings per space.
    pub fn build_space_stats(&self) -> HttpRequest {
        self.get("/dashboard/space-stats")
    }

    pub fn parse_space_stats(&self, response: HttpResponse) -> Result<Vec<SpaceStats>, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// GET `/dashboard/hourly-stats` — bookings per start hour.
    pub fn build_hourly_stats(&self) -> HttpRequest {
        self.get("/dashboard/hourly-stats")
    }

    pub fn parse_hourly_stats(&self, response: HttpResponse) -> Result<Vec<HourlyStats>, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// GET `/dashboard/status-stats` — bookings per lifecycle status.
    pub fn build_status_stats(&self) -> HttpRequest {
        self.get("/dashboard/status-stats")
    }

    pub fn parse_status_stats(&self, response: HttpResponse) -> Result<Vec<StatusStats>, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// GET `/dashboard/metrics` — aggregate numbers.
    pub fn build_metrics(&self) -> HttpRequest {
        self.get("/dashboard/metrics")
    }

    pub fn parse_metrics(&self, response: HttpResponse) -> Result<DashboardMetrics, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}
