use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A reservation request. `vehicle_id` is a weak reference: deleting the
/// vehicle leaves the booking (and its id) in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub vehicle_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub nic: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_days: i64,
    pub with_driver: bool,
    pub total_price: f64,
    pub status: BookingStatus,
    pub request_key: Option<String>,
    pub created_at: NaiveDateTime,
}

/// No transition graph: any status may follow any other via admin selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}
