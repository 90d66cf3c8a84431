use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{BookingStatus, Vehicle, VehicleType};
use crate::state::AppState;

use super::bookings::BookingResponse;

// Fallback shown for vehicles submitted without a photo
const DEFAULT_VEHICLE_IMAGE: &str =
    "https://images.unsplash.com/photo-1549317661-bd32c8ce0db2?w=600&h=400&fit=crop";

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// POST /api/admin/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// A hardcoded credential check, not a security boundary: the original
/// storefront validated the same fixed pair client-side.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if body.email != state.config.admin_email || body.password != state.config.admin_password {
        tracing::warn!(email = %body.email, "failed admin login attempt");
        return Err(AppError::Unauthorized);
    }

    Ok(Json(LoginResponse {
        token: state.config.admin_token.clone(),
    }))
}

// GET /api/admin/stats
#[derive(Serialize)]
pub struct StatsResponse {
    pub total_vehicles: i64,
    pub available_vehicles: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub total_revenue: f64,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let stats = {
        let db = state.db.lock().unwrap();
        queries::get_dashboard_stats(&db)?
    };

    Ok(Json(StatsResponse {
        total_vehicles: stats.total_vehicles,
        available_vehicles: stats.available_vehicles,
        total_bookings: stats.total_bookings,
        pending_bookings: stats.pending_bookings,
        total_revenue: stats.total_revenue,
    }))
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let status_filter = query.status.as_deref();

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::list_bookings(&db, status_filter, limit)?
    };

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// POST /api/admin/bookings/:id/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

/// Any status may follow any other; there is no transition graph.
/// Cancelling does not restore the vehicle's availability flag — the
/// administrator re-activates the vehicle manually.
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_booking_status(&db, &id, &body.status)?
    };

    if !updated {
        return Err(AppError::NotFound(format!("booking: {id}")));
    }

    tracing::info!(booking_id = %id, status = body.status.as_str(), "booking status updated");
    Ok(Json(serde_json::json!({ "ok": true })))
}

// Shared payload for vehicle create/update: every Vehicle field except id.
// Numeric fields are taken as-is; the rate card is administrator data and
// is not validated (negative values are accepted).
#[derive(Deserialize)]
pub struct VehicleForm {
    pub name: String,
    pub category: VehicleType,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub price_per_day: f64,
    #[serde(default)]
    pub price_per_km: f64,
    #[serde(default)]
    pub price_per_week: f64,
    #[serde(default)]
    pub price_per_month: f64,
    #[serde(default)]
    pub driver_option: bool,
    #[serde(default)]
    pub driver_price_per_day: f64,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_seats")]
    pub seats: i32,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub fuel_type: String,
}

fn default_available() -> bool {
    true
}

fn default_seats() -> i32 {
    4
}

impl VehicleForm {
    fn into_vehicle(self, id: String) -> Vehicle {
        let image = if self.image.is_empty() {
            DEFAULT_VEHICLE_IMAGE.to_string()
        } else {
            self.image
        };
        let images = if self.images.is_empty() {
            vec![image.clone()]
        } else {
            self.images
        };

        Vehicle {
            id,
            name: self.name,
            category: self.category,
            image,
            images,
            description: self.description,
            price_per_day: self.price_per_day,
            price_per_km: self.price_per_km,
            price_per_week: self.price_per_week,
            price_per_month: self.price_per_month,
            driver_option: self.driver_option,
            driver_price_per_day: self.driver_price_per_day,
            available: self.available,
            features: self.features,
            seats: self.seats,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
        }
    }
}

// POST /api/admin/vehicles
pub async fn add_vehicle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<VehicleForm>,
) -> Result<Json<Vehicle>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let vehicle = form.into_vehicle(Uuid::new_v4().to_string());

    {
        let db = state.db.lock().unwrap();
        queries::insert_vehicle(&db, &vehicle)?;
    }

    tracing::info!(vehicle_id = %vehicle.id, name = %vehicle.name, "vehicle added");
    Ok(Json(vehicle))
}

// PUT /api/admin/vehicles/:id
pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(form): Json<VehicleForm>,
) -> Result<Json<Vehicle>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let vehicle = form.into_vehicle(id.clone());

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_vehicle(&db, &vehicle)?
    };

    if !updated {
        return Err(AppError::NotFound(format!("vehicle: {id}")));
    }

    Ok(Json(vehicle))
}

// DELETE /api/admin/vehicles/:id
pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_vehicle(&db, &id)?
    };

    if !removed {
        return Err(AppError::NotFound(format!("vehicle: {id}")));
    }

    tracing::info!(vehicle_id = %id, "vehicle deleted");
    Ok(Json(serde_json::json!({ "ok": true })))
}
