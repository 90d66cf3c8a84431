use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::models::{Booking, BookingStatus, DateRange};
use crate::services::{availability, pricing};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("please fill in all required fields")]
    MissingFields,

    #[error("vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("vehicle is not available for the selected dates")]
    Unavailable,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// The booking-submission contract: customer fields are free text, dates are
/// inclusive, and `request_key` (when the client supplies one) makes the
/// submission idempotent.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub vehicle_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub nic: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub with_driver: bool,
    #[serde(default)]
    pub request_key: Option<String>,
}

/// Validates the request, checks availability, derives the day count and
/// total from the vehicle's rate card, and inserts the booking as pending.
/// A booking whose range contains today takes the vehicle off the
/// storefront by forcing its availability flag to false.
pub fn submit_booking(conn: &Connection, req: &BookingRequest) -> Result<Booking, BookingError> {
    if req.customer_name.trim().is_empty()
        || req.phone_number.trim().is_empty()
        || req.nic.trim().is_empty()
    {
        return Err(BookingError::MissingFields);
    }

    // Replaying a known request key returns the booking it created instead
    // of inserting a duplicate.
    if let Some(key) = &req.request_key {
        if let Some(existing) = queries::get_booking_by_request_key(conn, key)? {
            tracing::info!(booking_id = %existing.id, "duplicate submission, returning existing booking");
            return Ok(existing);
        }
    }

    let vehicle = queries::get_vehicle(conn, &req.vehicle_id)?
        .ok_or_else(|| BookingError::VehicleNotFound(req.vehicle_id.clone()))?;

    let range = DateRange::new(req.start_date, req.end_date);
    if !availability::is_vehicle_available(conn, &vehicle.id, &range)? {
        return Err(BookingError::Unavailable);
    }

    let quote = pricing::quote(&vehicle, &range, req.with_driver);

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        vehicle_id: vehicle.id.clone(),
        customer_name: req.customer_name.trim().to_string(),
        phone_number: req.phone_number.trim().to_string(),
        nic: req.nic.trim().to_string(),
        start_date: req.start_date,
        end_date: req.end_date,
        number_of_days: quote.number_of_days,
        with_driver: req.with_driver,
        total_price: quote.total,
        status: BookingStatus::Pending,
        request_key: req.request_key.clone(),
        created_at: Utc::now().naive_utc(),
    };
    queries::insert_booking(conn, &booking)?;

    let today = Utc::now().date_naive();
    if req.start_date <= today && today <= req.end_date {
        queries::set_vehicle_availability(conn, &vehicle.id, false)?;
        tracing::info!(vehicle_id = %vehicle.id, "booking spans today, vehicle marked unavailable");
    }

    tracing::info!(
        booking_id = %booking.id,
        vehicle_id = %vehicle.id,
        days = booking.number_of_days,
        total = booking.total_price,
        "booking created"
    );

    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{Vehicle, VehicleType};
    use chrono::Duration;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn insert_vehicle(conn: &Connection) -> Vehicle {
        let vehicle = Vehicle {
            id: "veh-1".to_string(),
            name: "Suzuki Alto".to_string(),
            category: VehicleType::Car,
            image: String::new(),
            images: vec![],
            description: String::new(),
            price_per_day: 7000.0,
            price_per_km: 45.0,
            price_per_week: 42000.0,
            price_per_month: 140000.0,
            driver_option: true,
            driver_price_per_day: 1500.0,
            available: true,
            features: vec![],
            seats: 4,
            transmission: "Automatic".to_string(),
            fuel_type: "Petrol".to_string(),
        };
        queries::insert_vehicle(conn, &vehicle).unwrap();
        vehicle
    }

    fn request(vehicle_id: &str, start: NaiveDate, end: NaiveDate) -> BookingRequest {
        BookingRequest {
            vehicle_id: vehicle_id.to_string(),
            customer_name: "John Perera".to_string(),
            phone_number: "0771234567".to_string(),
            nic: "199012345678".to_string(),
            start_date: start,
            end_date: end,
            with_driver: false,
            request_key: None,
        }
    }

    #[test]
    fn test_submit_derives_days_and_price() {
        let conn = setup_db();
        insert_vehicle(&conn);

        let start = Utc::now().date_naive() + Duration::days(10);
        let booking = submit_booking(&conn, &request("veh-1", start, start + Duration::days(4))).unwrap();

        assert_eq!(booking.number_of_days, 5);
        assert_eq!(booking.total_price, 35000.0);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(!booking.id.is_empty());

        // Future-dated booking leaves the availability flag alone
        let vehicle = queries::get_vehicle(&conn, "veh-1").unwrap().unwrap();
        assert!(vehicle.available);
    }

    #[test]
    fn test_blank_customer_fields_rejected() {
        let conn = setup_db();
        insert_vehicle(&conn);

        let start = Utc::now().date_naive() + Duration::days(1);
        let mut req = request("veh-1", start, start);
        req.customer_name = "   ".to_string();

        let err = submit_booking(&conn, &req).unwrap_err();
        assert!(matches!(err, BookingError::MissingFields));
    }

    #[test]
    fn test_unknown_vehicle_rejected() {
        let conn = setup_db();

        let start = Utc::now().date_naive() + Duration::days(1);
        let err = submit_booking(&conn, &request("ghost", start, start)).unwrap_err();
        assert!(matches!(err, BookingError::VehicleNotFound(_)));
    }

    #[test]
    fn test_overlapping_dates_rejected() {
        let conn = setup_db();
        insert_vehicle(&conn);

        let start = Utc::now().date_naive() + Duration::days(10);
        submit_booking(&conn, &request("veh-1", start, start + Duration::days(5))).unwrap();

        // Touches the last day of the existing booking
        let err = submit_booking(
            &conn,
            &request("veh-1", start + Duration::days(5), start + Duration::days(8)),
        )
        .unwrap_err();
        assert!(matches!(err, BookingError::Unavailable));
    }

    #[test]
    fn test_booking_spanning_today_marks_vehicle_unavailable() {
        let conn = setup_db();
        insert_vehicle(&conn);

        let today = Utc::now().date_naive();
        submit_booking(&conn, &request("veh-1", today - Duration::days(1), today + Duration::days(1)))
            .unwrap();

        let vehicle = queries::get_vehicle(&conn, "veh-1").unwrap().unwrap();
        assert!(!vehicle.available);
    }

    #[test]
    fn test_request_key_makes_submission_idempotent() {
        let conn = setup_db();
        insert_vehicle(&conn);

        let start = Utc::now().date_naive() + Duration::days(10);
        let mut req = request("veh-1", start, start + Duration::days(2));
        req.request_key = Some("double-click".to_string());

        let first = submit_booking(&conn, &req).unwrap();
        // The second submission would conflict with the first; the key
        // short-circuits before the availability check.
        let second = submit_booking(&conn, &req).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(queries::list_bookings(&conn, None, 50).unwrap().len(), 1);
    }
}
