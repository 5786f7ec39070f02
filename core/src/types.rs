//! Wire DTOs for the coworking booking API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; the integration tests catch any drift between the
//! two. Timestamps are `chrono::DateTime<Utc>` and serialize as ISO-8601
//! strings. Server-owned data (`Space`, `Booking`) is treated as read-only:
//! the client never fabricates ids or recomputes server fields.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration input.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Identity returned by login, register and session check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: AuthUser,
    pub access_token: String,
    pub token_type: String,
}

/// Payload of a successful session check.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub user: AuthUser,
}

/// A bookable coworking space. Server-owned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Space {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub price_per_hour: f64,
    pub is_active: bool,
    pub location: String,
    pub address: String,
    pub city: String,
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Booking lifecycle status. The server is the authority on transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A booking as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub space_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// Request payload for creating a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub space_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: f64,
    pub status: BookingStatus,
}

impl NewBooking {
    /// Quote a pending booking for `duration_hours` starting at `start`.
    ///
    /// The end time is always derived from the start and duration, and the
    /// price from the space's hourly rate; the user never supplies either
    /// independently. The server recomputes both authoritatively.
    pub fn for_slot(space: &Space, start: DateTime<Utc>, duration_hours: u32) -> Self {
        Self {
            space_id: space.id,
            start_time: start,
            end_time: start + Duration::hours(i64::from(duration_hours)),
            total_price: space.price_per_hour * f64::from(duration_hours),
            status: BookingStatus::Pending,
        }
    }
}

/// Partial update for a booking: status transitions and reschedules both go
/// through this shape. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

impl BookingUpdate {
    /// Update that only changes the status.
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Reschedule to a new slot, re-deriving end time and price the same way
    /// `NewBooking::for_slot` does.
    pub fn reschedule(space: &Space, start: DateTime<Utc>, duration_hours: u32) -> Self {
        Self {
            start_time: Some(start),
            end_time: Some(start + Duration::hours(i64::from(duration_hours))),
            total_price: Some(space.price_per_hour * f64::from(duration_hours)),
            status: None,
        }
    }
}

/// Availability answer for a space and time range. Advisory only — it
/// reserves nothing; creation-time conflict detection is authoritative.
#[derive(Debug, Clone, Deserialize)]
pub struct Availability {
    pub available: bool,
}

/// Bookings per space, for the dashboard bar chart.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SpaceStats {
    pub name: String,
    pub bookings: u64,
}

/// Bookings per start hour of day.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HourlyStats {
    pub hour: u8,
    pub bookings: u64,
}

/// Bookings per lifecycle status.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StatusStats {
    pub status: BookingStatus,
    pub count: u64,
}

/// Aggregate dashboard numbers. camelCase on the wire.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_bookings: u64,
    pub active_spaces: u64,
    pub average_booking_duration: f64,
    pub occupancy_rate: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn space(price_per_hour: f64) -> Space {
        Space {
            id: Uuid::nil(),
            name: "Sala Norte".to_string(),
            description: "Sala de reuniones".to_string(),
            capacity: 8,
            price_per_hour,
            is_active: true,
            location: "Planta 2".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            amenities: vec!["wifi".to_string(), "proyector".to_string()],
            image_url: None,
        }
    }

    #[test]
    fn quote_derives_end_time_and_price() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let booking = NewBooking::for_slot(&space(25.0), start, 3);

        assert_eq!(booking.start_time, start);
        assert_eq!(
            booking.end_time,
            Utc.with_ymd_and_hms(2025, 6, 2, 13, 0, 0).unwrap()
        );
        assert_eq!(booking.total_price, 75.0);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<BookingStatus>("\"cancelled\"").unwrap(),
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn status_only_update_serializes_single_field() {
        let update = BookingUpdate::status(BookingStatus::Confirmed);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"status": "confirmed"}));
    }

    #[test]
    fn reschedule_re_derives_end_and_price() {
        let start = Utc.with_ymd_and_hms(2025, 6, 3, 9, 0, 0).unwrap();
        let update = BookingUpdate::reschedule(&space(10.0), start, 2);

        assert_eq!(
            update.end_time,
            Some(Utc.with_ymd_and_hms(2025, 6, 3, 11, 0, 0).unwrap())
        );
        assert_eq!(update.total_price, Some(20.0));
        assert!(update.status.is_none());
    }

    #[test]
    fn timestamps_serialize_as_iso_8601() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let booking = NewBooking::for_slot(&space(25.0), start, 1);
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["start_time"], "2025-06-02T10:00:00Z");
        assert_eq!(json["end_time"], "2025-06-02T11:00:00Z");
    }

    #[test]
    fn metrics_deserialize_from_camel_case() {
        let metrics: DashboardMetrics = serde_json::from_str(
            r#"{"totalBookings":12,"activeSpaces":3,"averageBookingDuration":2.5,"occupancyRate":41.7}"#,
        )
        .unwrap();
        assert_eq!(metrics.total_bookings, 12);
        assert_eq!(metrics.active_spaces, 3);
        assert_eq!(metrics.average_booking_duration, 2.5);
        assert_eq!(metrics.occupancy_rate, 41.7);
    }
}
