use serde::{Deserialize, Serialize};

/// One row of the rental fleet. Week/month rates are independent
/// administrator-set discount tiers, never derived from the daily rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub category: VehicleType,
    pub image: String,
    pub images: Vec<String>,
    pub description: String,
    pub price_per_day: f64,
    pub price_per_km: f64,
    pub price_per_week: f64,
    pub price_per_month: f64,
    pub driver_option: bool,
    pub driver_price_per_day: f64,
    pub available: bool,
    pub features: Vec<String>,
    pub seats: i32,
    pub transmission: String,
    pub fuel_type: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleType {
    #[serde(rename = "Motorbike")]
    Motorbike,
    #[serde(rename = "Three-Wheeler")]
    ThreeWheeler,
    #[serde(rename = "Car")]
    Car,
    #[serde(rename = "Buddy Van")]
    BuddyVan,
    #[serde(rename = "Van")]
    Van,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Motorbike => "Motorbike",
            VehicleType::ThreeWheeler => "Three-Wheeler",
            VehicleType::Car => "Car",
            VehicleType::BuddyVan => "Buddy Van",
            VehicleType::Van => "Van",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Motorbike" => Some(VehicleType::Motorbike),
            "Three-Wheeler" => Some(VehicleType::ThreeWheeler),
            "Car" => Some(VehicleType::Car),
            "Buddy Van" => Some(VehicleType::BuddyVan),
            "Van" => Some(VehicleType::Van),
            _ => None,
        }
    }
}
