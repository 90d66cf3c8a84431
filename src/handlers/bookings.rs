use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, Vehicle};
use crate::services::booking::{submit_booking, BookingRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub vehicle_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub nic: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_days: i64,
    pub with_driver: bool,
    pub total_price: f64,
    pub status: String,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            vehicle_id: b.vehicle_id,
            customer_name: b.customer_name,
            phone_number: b.phone_number,
            nic: b.nic,
            start_date: b.start_date.format("%Y-%m-%d").to_string(),
            end_date: b.end_date.format("%Y-%m-%d").to_string(),
            number_of_days: b.number_of_days,
            with_driver: b.with_driver,
            total_price: b.total_price,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        submit_booking(&db, &request)?
    };

    Ok(Json(booking.into()))
}

// GET /api/bookings/:id
#[derive(Serialize)]
pub struct BookingDetailResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    // None when the referenced vehicle has since been deleted; the
    // storefront renders an "unknown vehicle" fallback.
    pub vehicle: Option<Vehicle>,
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingDetailResponse>, AppError> {
    let (booking, vehicle) = {
        let db = state.db.lock().unwrap();
        let booking = queries::get_booking(&db, &id)?
            .ok_or_else(|| AppError::NotFound(format!("booking: {id}")))?;
        let vehicle = queries::get_vehicle(&db, &booking.vehicle_id)?;
        (booking, vehicle)
    };

    Ok(Json(BookingDetailResponse {
        booking: booking.into(),
        vehicle,
    }))
}
