//! In-memory mock of the coworking booking API.
//!
//! Implements the REST surface the client core talks to: query-parameter
//! auth endpoints, a seeded space catalogue, per-user bookings with
//! authoritative conflict detection, and dashboard aggregates computed from
//! state. Error bodies are `{ "message": ... }` JSON; requests with a wrong
//! method fall through to axum's bare 405, which exercises the client's
//! fallback messages.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub space_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: f64,
    pub status: BookingStatus,
    #[serde(skip)]
    owner: String,
}

#[derive(Deserialize)]
pub struct NewBooking {
    pub space_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: f64,
    pub status: BookingStatus,
}

#[derive(Deserialize)]
pub struct BookingUpdate {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_price: Option<f64>,
    pub status: Option<BookingStatus>,
}

#[derive(Deserialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterParams {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Deserialize)]
pub struct AvailabilityParams {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SpaceStats {
    pub name: String,
    pub bookings: u64,
}

#[derive(Serialize)]
pub struct HourlyStats {
    pub hour: u8,
    pub bookings: u64,
}

#[derive(Serialize)]
pub struct StatusStats {
    pub status: BookingStatus,
    pub count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_bookings: u64,
    pub active_spaces: u64,
    pub average_booking_duration: f64,
    pub occupancy_rate: f64,
}

#[derive(Clone)]
struct UserRecord {
    password: String,
    full_name: String,
}

pub struct AppState {
    users: HashMap<String, UserRecord>,
    /// token -> email
    sessions: HashMap<String, String>,
    spaces: Vec<Space>,
    bookings: Vec<Booking>,
}

pub type Db = Arc<RwLock<AppState>>;

fn seed_spaces() -> Vec<Space> {
    vec![
        Space {
            id: Uuid::new_v4(),
            name: "Sala Norte".to_string(),
            description: "Sala de reuniones con luz natural".to_string(),
            capacity: 8,
            price_per_hour: 25.0,
            is_active: true,
            location: "Planta 2".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            amenities: vec!["wifi".to_string(), "proyector".to_string()],
            image_url: None,
        },
        Space {
            id: Uuid::new_v4(),
            name: "Open Space Sur".to_string(),
            description: "Zona abierta de trabajo compartido".to_string(),
            capacity: 20,
            price_per_hour: 10.0,
            is_active: true,
            location: "Planta 1".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            amenities: vec!["wifi".to_string(), "café".to_string()],
            image_url: Some("https://example.com/open-space.jpg".to_string()),
        },
        Space {
            id: Uuid::new_v4(),
            name: "Cabina Este".to_string(),
            description: "Cabina individual para llamadas".to_string(),
            capacity: 1,
            price_per_hour: 5.0,
            is_active: false,
            location: "Planta 1".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            amenities: vec!["wifi".to_string()],
            image_url: None,
        },
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(AppState {
        users: HashMap::new(),
        sessions: HashMap::new(),
        spaces: seed_spaces(),
        bookings: Vec::new(),
    }));
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .route("/spaces", get(list_spaces))
        .route("/spaces/{id}/availability", get(availability))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", put(update_booking).delete(delete_booking))
        .route("/dashboard/space-stats", get(space_stats))
        .route("/dashboard/hourly-stats", get(hourly_stats))
        .route("/dashboard/status-stats", get(status_stats))
        .route("/dashboard/metrics", get(metrics))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Failure = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: &str) -> Failure {
    (status, Json(json!({ "message": message })))
}

/// Resolve the bearer token to the email of the logged-in user.
async fn authed(db: &Db, headers: &HeaderMap) -> Result<String, Failure> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "No autorizado"))?;
    let state = db.read().await;
    state
        .sessions
        .get(token)
        .cloned()
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "No autorizado"))
}

fn auth_payload(email: &str, full_name: &str, token: &str) -> Value {
    json!({
        "user": { "email": email, "full_name": full_name },
        "access_token": token,
        "token_type": "bearer",
    })
}

async fn login(
    State(db): State<Db>,
    Query(params): Query<LoginParams>,
) -> Result<Json<Value>, Failure> {
    let mut state = db.write().await;
    let full_name = match state.users.get(&params.email) {
        Some(user) if user.password == params.password => user.full_name.clone(),
        _ => return Err(failure(StatusCode::UNAUTHORIZED, "Credenciales inválidas")),
    };
    let token = Uuid::new_v4().to_string();
    state.sessions.insert(token.clone(), params.email.clone());
    tracing::debug!(email = %params.email, "login");
    Ok(Json(auth_payload(&params.email, &full_name, &token)))
}

// Registration fields arrive both as query parameters and as a JSON body;
// this server reads the query side.
async fn register(
    State(db): State<Db>,
    Query(params): Query<RegisterParams>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut state = db.write().await;
    if state.users.contains_key(&params.email) {
        return Err(failure(StatusCode::CONFLICT, "El correo ya existe"));
    }
    state.users.insert(
        params.email.clone(),
        UserRecord {
            password: params.password.clone(),
            full_name: params.full_name.clone(),
        },
    );
    let token = Uuid::new_v4().to_string();
    state.sessions.insert(token.clone(), params.email.clone());
    tracing::debug!(email = %params.email, "registered");
    Ok((
        StatusCode::CREATED,
        Json(auth_payload(&params.email, &params.full_name, &token)),
    ))
}

// Best-effort: an unknown or missing token still "logs out".
async fn logout(State(db): State<Db>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        db.write().await.sessions.remove(token);
    }
    StatusCode::NO_CONTENT
}

async fn session(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    let email = authed(&db, &headers).await?;
    let state = db.read().await;
    let full_name = state
        .users
        .get(&email)
        .map(|u| u.full_name.clone())
        .unwrap_or_default();
    Ok(Json(json!({ "user": { "email": email, "full_name": full_name } })))
}

async fn list_spaces(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<Space>>, Failure> {
    authed(&db, &headers).await?;
    Ok(Json(db.read().await.spaces.clone()))
}

fn overlaps(booking: &Booking, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    booking.status != BookingStatus::Cancelled && start < booking.end_time && booking.start_time < end
}

fn slot_is_free(state: &AppState, space_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    !state
        .bookings
        .iter()
        .any(|b| b.space_id == space_id && overlaps(b, start, end))
}

async fn availability(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<Value>, Failure> {
    authed(&db, &headers).await?;
    let state = db.read().await;
    if !state.spaces.iter().any(|s| s.id == id) {
        return Err(failure(StatusCode::NOT_FOUND, "Espacio no encontrado"));
    }
    let available = slot_is_free(&state, id, params.start_time, params.end_time);
    Ok(Json(json!({ "available": available })))
}

async fn create_booking(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), Failure> {
    let owner = authed(&db, &headers).await?;
    let mut state = db.write().await;
    if !state.spaces.iter().any(|s| s.id == input.space_id) {
        return Err(failure(StatusCode::NOT_FOUND, "Espacio no encontrado"));
    }
    // Authoritative conflict check; the advisory availability answer a client
    // saw earlier may no longer hold.
    if !slot_is_free(&state, input.space_id, input.start_time, input.end_time) {
        return Err(failure(
            StatusCode::CONFLICT,
            "El espacio no está disponible en ese horario",
        ));
    }
    let booking = Booking {
        id: Uuid::new_v4(),
        space_id: input.space_id,
        start_time: input.start_time,
        end_time: input.end_time,
        total_price: input.total_price,
        status: input.status,
        owner,
    };
    state.bookings.push(booking.clone());
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn list_bookings(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, Failure> {
    let owner = authed(&db, &headers).await?;
    let state = db.read().await;
    let own: Vec<Booking> = state
        .bookings
        .iter()
        .filter(|b| b.owner == owner)
        .cloned()
        .collect();
    Ok(Json(own))
}

async fn update_booking(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<BookingUpdate>,
) -> Result<Json<Booking>, Failure> {
    let owner = authed(&db, &headers).await?;
    let mut state = db.write().await;
    let booking = state
        .bookings
        .iter_mut()
        .find(|b| b.id == id && b.owner == owner)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Reserva no encontrada"))?;
    if let Some(start_time) = input.start_time {
        booking.start_time = start_time;
    }
    if let Some(end_time) = input.end_time {
        booking.end_time = end_time;
    }
    if let Some(total_price) = input.total_price {
        booking.total_price = total_price;
    }
    if let Some(status) = input.status {
        booking.status = status;
    }
    Ok(Json(booking.clone()))
}

async fn delete_booking(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Failure> {
    let owner = authed(&db, &headers).await?;
    let mut state = db.write().await;
    let before = state.bookings.len();
    state.bookings.retain(|b| !(b.id == id && b.owner == owner));
    if state.bookings.len() == before {
        return Err(failure(StatusCode::NOT_FOUND, "Reserva no encontrada"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn space_stats(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<SpaceStats>>, Failure> {
    authed(&db, &headers).await?;
    let state = db.read().await;
    let stats = state
        .spaces
        .iter()
        .map(|space| SpaceStats {
            name: space.name.clone(),
            bookings: state.bookings.iter().filter(|b| b.space_id == space.id).count() as u64,
        })
        .collect();
    Ok(Json(stats))
}

async fn hourly_stats(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<HourlyStats>>, Failure> {
    authed(&db, &headers).await?;
    let state = db.read().await;
    let mut by_hour: HashMap<u8, u64> = HashMap::new();
    for booking in &state.bookings {
        *by_hour.entry(booking.start_time.hour() as u8).or_default() += 1;
    }
    let mut stats: Vec<HourlyStats> = by_hour
        .into_iter()
        .map(|(hour, bookings)| HourlyStats { hour, bookings })
        .collect();
    stats.sort_by_key(|s| s.hour);
    Ok(Json(stats))
}

async fn status_stats(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<StatusStats>>, Failure> {
    authed(&db, &headers).await?;
    let state = db.read().await;
    let mut by_status: HashMap<BookingStatus, u64> = HashMap::new();
    for booking in &state.bookings {
        *by_status.entry(booking.status).or_default() += 1;
    }
    let mut stats: Vec<StatusStats> = by_status
        .into_iter()
        .map(|(status, count)| StatusStats { status, count })
        .collect();
    stats.sort_by_key(|s| s.count);
    stats.reverse();
    Ok(Json(stats))
}

async fn metrics(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<DashboardMetrics>, Failure> {
    authed(&db, &headers).await?;
    let state = db.read().await;
    let total_bookings = state.bookings.len() as u64;
    let active_spaces = state.spaces.iter().filter(|s| s.is_active).count() as u64;

    let booked_hours: f64 = state
        .bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .map(|b| (b.end_time - b.start_time).num_minutes() as f64 / 60.0)
        .sum();
    let average_booking_duration = if total_bookings == 0 {
        0.0
    } else {
        booked_hours / total_bookings as f64
    };
    // Share of one day of active-space capacity that is booked.
    let capacity_hours = active_spaces as f64 * 24.0;
    let occupancy_rate = if capacity_hours == 0.0 {
        0.0
    } else {
        (booked_hours / capacity_hours * 100.0).min(100.0)
    };

    Ok(Json(DashboardMetrics {
        total_bookings,
        active_spaces,
        average_booking_duration,
        occupancy_rate,
    }))
}
