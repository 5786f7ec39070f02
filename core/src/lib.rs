//! API client core for the coworking booking service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `BookingApi` holds a `base_url` and an injected [`SessionStore`]; the
//!   store is the only mutable state, written solely by the auth operations.
//! - Each resource operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Non-2xx responses normalize into a uniform `{ message, status }` error.
//! - The bearer token hydrates lazily from durable storage, so a session
//!   survives process restarts the way a browser token survives reloads.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use client::BookingApi;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{FileStorage, MemoryStorage, SessionStore, TokenStorage};
pub use types::{
    AuthResponse, AuthUser, Availability, Booking, BookingStatus, BookingUpdate, Credentials,
    DashboardMetrics, HourlyStats, NewBooking, Registration, Session, Space, SpaceStats,
    StatusStats,
};
