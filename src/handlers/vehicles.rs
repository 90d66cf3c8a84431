use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{DateRange, Vehicle, VehicleType};
use crate::services::{availability, pricing};
use crate::state::AppState;

// GET /api/vehicles
#[derive(Deserialize)]
pub struct VehicleListQuery {
    pub category: Option<String>,
    pub driver: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub availability: Option<String>,
    pub q: Option<String>,
}

fn parse_filter(query: &VehicleListQuery) -> Result<queries::VehicleFilter, AppError> {
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(s) => Some(
            VehicleType::from_str(s)
                .ok_or_else(|| AppError::Validation(format!("unknown vehicle category: {s}")))?,
        ),
    };

    let with_driver = match query.driver.as_deref() {
        None | Some("all") => None,
        Some("with") => Some(true),
        Some("without") => Some(false),
        Some(s) => {
            return Err(AppError::Validation(format!("unknown driver filter: {s}")));
        }
    };

    let available = match query.availability.as_deref() {
        None | Some("all") => None,
        Some("available") => Some(true),
        Some("booked") => Some(false),
        Some(s) => {
            return Err(AppError::Validation(format!(
                "unknown availability filter: {s}"
            )));
        }
    };

    Ok(queries::VehicleFilter {
        category,
        with_driver,
        min_price: query.min_price,
        max_price: query.max_price,
        available,
        search: query.q.clone().filter(|s| !s.is_empty()),
    })
}

pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let filter = parse_filter(&query)?;

    let vehicles = {
        let db = state.db.lock().unwrap();
        queries::list_vehicles(&db, &filter)?
    };

    Ok(Json(vehicles))
}

// GET /api/vehicles/:id
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = {
        let db = state.db.lock().unwrap();
        queries::get_vehicle(&db, &id)?
    };

    vehicle
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("vehicle: {id}")))
}

// GET /api/vehicles/:id/booked-dates
pub async fn get_booked_dates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DateRange>>, AppError> {
    let ranges = {
        let db = state.db.lock().unwrap();
        availability::booked_dates_for_vehicle(&db, &id)?
    };

    Ok(Json(ranges))
}

// GET /api/vehicles/:id/availability
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let range = DateRange {
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let available = {
        let db = state.db.lock().unwrap();
        availability::is_vehicle_available(&db, &id, &range)?
    };

    Ok(Json(AvailabilityResponse { available }))
}

// GET /api/vehicles/:id/quote
#[derive(Deserialize)]
pub struct QuoteQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub with_driver: bool,
}

pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<pricing::Quote>, AppError> {
    let vehicle = {
        let db = state.db.lock().unwrap();
        queries::get_vehicle(&db, &id)?
    }
    .ok_or_else(|| AppError::NotFound(format!("vehicle: {id}")))?;

    let range = DateRange {
        start_date: query.start_date,
        end_date: query.end_date,
    };

    Ok(Json(pricing::quote(&vehicle, &range, query.with_driver)))
}
