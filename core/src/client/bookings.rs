//! Booking CRUD.
//!
//! Creation is where conflicts become authoritative: a prior availability
//! answer may no longer hold, and a 409 here is the server's final word.

use uuid::Uuid;

use crate::error::{self, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Booking, BookingUpdate, NewBooking};

use super::BookingApi;

impl BookingApi {
    /// POST `/bookings` with the booking as JSON body.
    pub fn build_create_booking(&self, booking: &NewBooking) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(booking)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/bookings", self.base_url),
            query: Vec::new(),
            headers: self.headers(true),
            body: Some(body),
        })
    }

    pub fn parse_create_booking(&self, response: HttpResponse) -> Result<Booking, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// GET `/bookings` — the caller's own bookings.
    pub fn build_list_bookings(&self) -> HttpRequest {
        self.get("/bookings")
    }

    pub fn parse_list_bookings(&self, response: HttpResponse) -> Result<Vec<Booking>, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// PUT `/bookings/{id}` with a partial body; covers status transitions
    /// and reschedules alike.
    pub fn build_update_booking(
        &self,
        id: Uuid,
        update: &BookingUpdate,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(update)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/bookings/{id}", self.base_url),
            query: Vec::new(),
            headers: self.headers(true),
            body: Some(body),
        })
    }

    pub fn parse_update_booking(&self, response: HttpResponse) -> Result<Booking, ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// DELETE `/bookings/{id}`. Terminal; no body on success.
    pub fn build_delete_booking(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/bookings/{id}", self.base_url),
            query: Vec::new(),
            headers: self.headers(true),
            body: None,
        }
    }

    pub fn parse_delete_booking(&self, response: HttpResponse) -> Result<(), ApiError> {
        if !response.is_success() {
            return Err(error::normalize(&response));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::session::SessionStore;
    use crate::types::BookingStatus;

    use super::*;

    fn client() -> BookingApi {
        let api = BookingApi::new("http://localhost:8000", SessionStore::in_memory());
        api.session().set_token(Some("tok"));
        api
    }

    fn new_booking() -> NewBooking {
        NewBooking {
            space_id: Uuid::nil(),
            start_time: Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap(),
            total_price: 50.0,
            status: BookingStatus::Pending,
        }
    }

    #[test]
    fn create_request_posts_json_body() {
        let req = client().build_create_booking(&new_booking()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/bookings");

        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["space_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(body["start_time"], "2025-06-02T10:00:00Z");
        assert_eq!(body["end_time"], "2025-06-02T12:00:00Z");
        assert_eq!(body["total_price"], 50.0);
        assert_eq!(body["status"], "pending");
    }

    #[test]
    fn creation_conflict_is_normalized() {
        let api = client();
        let resp = HttpResponse {
            status: 409,
            headers: Vec::new(),
            body: r#"{"message":"El espacio no está disponible en ese horario"}"#.to_string(),
        };
        let err = api.parse_create_booking(resp).unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "El espacio no está disponible en ese horario");
    }

    #[test]
    fn status_update_sends_only_status() {
        let req = client()
            .build_update_booking(Uuid::nil(), &BookingUpdate::status(BookingStatus::Cancelled))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(
            req.path,
            "http://localhost:8000/bookings/00000000-0000-0000-0000-000000000000"
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "cancelled"}));
    }

    #[test]
    fn delete_request_has_no_body() {
        let req = client().build_delete_booking(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn delete_success_parses_empty_body() {
        let api = client();
        let resp = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(api.parse_delete_booking(resp).is_ok());
    }

    #[test]
    fn bookings_list_deserializes() {
        let api = client();
        let resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"[{
                "id": "00000000-0000-0000-0000-000000000002",
                "space_id": "00000000-0000-0000-0000-000000000001",
                "start_time": "2025-06-02T10:00:00Z",
                "end_time": "2025-06-02T12:00:00Z",
                "total_price": 50.0,
                "status": "confirmed"
            }]"#
            .to_string(),
        };
        let bookings = api.parse_list_bookings(resp).unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].status, BookingStatus::Confirmed);
    }
}
