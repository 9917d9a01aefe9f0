#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use salon_core::{ClientConfig, ClientConfigBuilder};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const PASSWORD: &str = "secret";
pub const REFRESH_TOKEN: &str = "refresh-1";

/// Mutable state of the in-process backend.
#[derive(Debug)]
pub struct MockState {
    /// The only access token currently accepted
    pub access_token: String,
    pub refresh_calls: u32,
    pub slot_queries: Vec<HashMap<String, String>>,
    pub created: Vec<Value>,
    /// When set, booking creation fails with this message
    pub reject_booking: Option<String>,
    pub branding_available: bool,
    /// Status reported back for newly created bookings
    pub created_status: String,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            access_token: "access-1".to_string(),
            refresh_calls: 0,
            slot_queries: Vec::new(),
            created: Vec::new(),
            reject_booking: None,
            branding_available: true,
            created_status: "pending".to_string(),
        }
    }
}

pub type SharedState = Arc<Mutex<MockState>>;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Token expired" })),
    )
}

fn check_auth(headers: &HeaderMap, state: &MockState) -> Result<(), (StatusCode, Json<Value>)> {
    let expected = format!("Bearer {}", state.access_token);
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(unauthorized())
    }
}

fn profile() -> Value {
    json!({
        "id": 7,
        "name": "Amy Chen",
        "email": "amy@example.com",
        "phone": "0912345678",
        "role": "customer"
    })
}

async fn list_services() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Haircut", "category": "hair", "description": "Wash, cut and style",
          "duration": 60, "price": 800, "is_active": true },
        { "id": 2, "name": "Hair colouring", "category": "hair", "description": "",
          "duration": 45, "price": 1200.0, "is_active": true },
        { "id": 5, "name": "Gel manicure", "category": "nail", "description": "",
          "duration": 30, "price": 600, "is_active": true },
        { "id": 9, "name": "Retired perm", "category": "hair", "duration": 90,
          "price": 2500, "is_active": false }
    ]))
}

async fn list_stylists() -> Json<Value> {
    Json(json!([
        { "id": 4, "name": "Mia", "specialty": "hair,nail", "experience": 8,
          "rating": 4.9, "is_active": true },
        { "id": 6, "name": "Leo", "specialty": ["hair"], "experience_years": 3,
          "is_active": false }
    ]))
}

async fn available_slots(
    State(state): State<SharedState>,
    Path(stylist_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut recorded = params;
    recorded.insert("stylist_id".to_string(), stylist_id.to_string());
    state.lock().unwrap().slot_queries.push(recorded);
    Json(json!({
        "slots": [
            { "time": "17:30", "available": true },
            { "time": "18:00", "available": false },
            { "time": "18:30:00", "available": true }
        ]
    }))
}

async fn create_booking(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().unwrap();
    check_auth(&headers, &state)?;
    if let Some(message) = state.reject_booking.clone() {
        return Err((StatusCode::CONFLICT, Json(json!({ "error": message }))));
    }
    state.created.push(body);
    Ok(Json(json!({ "id": 42, "status": state.created_status, "total_price": 2000 })))
}

async fn list_bookings(State(state): State<SharedState>, headers: HeaderMap) -> Reply {
    let state = state.lock().unwrap();
    check_auth(&headers, &state)?;
    Ok(Json(json!([
        { "id": 42, "service_ids": [1, 2], "stylist_id": 4, "booking_date": "2026-10-20",
          "booking_time": "18:30", "customer_name": "Amy Chen", "customer_phone": "0912345678",
          "status": "confirmed", "created_at": "2026-10-19T08:00:00Z" }
    ])))
}

async fn cancel_booking(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Reply {
    let state = state.lock().unwrap();
    check_auth(&headers, &state)?;
    if id != 42 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Booking not found" })),
        ));
    }
    Ok(Json(json!({
        "id": 42, "service_id": 1, "stylist_id": 4, "date": "2026-10-20T00:00:00Z",
        "time": "18:30", "status": "cancelled"
    })))
}

async fn login(Json(body): Json<Value>) -> Reply {
    if body["password"] != PASSWORD {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password" })),
        ));
    }
    Ok(Json(json!({
        "access_token": "access-1",
        "refresh_token": REFRESH_TOKEN,
        "user": profile()
    })))
}

async fn refresh(State(state): State<SharedState>, Json(body): Json<Value>) -> Reply {
    let mut state = state.lock().unwrap();
    state.refresh_calls += 1;
    if body["refresh_token"] != REFRESH_TOKEN {
        return Err(unauthorized());
    }
    state.access_token = format!("access-{}", state.refresh_calls + 1);
    Ok(Json(json!({ "access_token": state.access_token })))
}

async fn current_profile(State(state): State<SharedState>, headers: HeaderMap) -> Reply {
    let state = state.lock().unwrap();
    check_auth(&headers, &state)?;
    Ok(Json(json!({ "user": profile() })))
}

async fn branding(State(state): State<SharedState>) -> Reply {
    if !state.lock().unwrap().branding_available {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "settings unavailable" })),
        ));
    }
    Ok(Json(json!({ "name": "Studio K", "theme_color": "#222222" })))
}

/// Starts the in-process backend on an ephemeral port.
pub async fn spawn_backend() -> (String, SharedState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let state = SharedState::default();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let app = Router::new()
        .route("/api/v1/services", get(list_services))
        .route("/api/v1/stylists", get(list_stylists))
        .route("/api/v1/stylists/:id/available-slots", get(available_slots))
        .route("/api/v1/bookings", post(create_booking).get(list_bookings))
        .route("/api/v1/bookings/:id/cancel", post(cancel_booking))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/profile", get(current_profile))
        .route("/api/v1/settings/branding", get(branding))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

/// Configuration pointing at `url` with a throwaway data directory.
pub fn test_config(url: &str) -> (TempDir, ClientConfig) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = ClientConfigBuilder::new()
        .with_api_url(Some(url))
        .with_data_dir(Some(temp_dir.path()))
        .build()
        .expect("Failed to build config");
    (temp_dir, config)
}
