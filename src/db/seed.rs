use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::models::{Booking, BookingStatus, Vehicle, VehicleType};

/// Populates an empty store with the demo fleet and a couple of bookings,
/// mirroring what the storefront shipped with. No-op once any vehicle
/// exists, so a file-backed store is only seeded on first run.
pub fn seed_demo_data(conn: &Connection) -> anyhow::Result<()> {
    if queries::count_vehicles(conn)? > 0 {
        return Ok(());
    }

    let fleet = demo_fleet();
    for vehicle in &fleet {
        queries::insert_vehicle(conn, vehicle)?;
    }

    for booking in demo_bookings(&fleet) {
        queries::insert_booking(conn, &booking)?;
    }

    tracing::info!(vehicles = fleet.len(), "seeded demo fleet");
    Ok(())
}

fn demo_vehicle(name: &str, category: VehicleType) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        category,
        image: String::new(),
        images: vec![],
        description: String::new(),
        price_per_day: 0.0,
        price_per_km: 0.0,
        price_per_week: 0.0,
        price_per_month: 0.0,
        driver_option: false,
        driver_price_per_day: 0.0,
        available: true,
        features: vec![],
        seats: 4,
        transmission: "Manual".to_string(),
        fuel_type: "Petrol".to_string(),
    }
}

fn demo_fleet() -> Vec<Vehicle> {
    vec![
        Vehicle {
            description: "Economical commuter bike, ideal for solo travel around the city.".to_string(),
            price_per_day: 1500.0,
            price_per_km: 15.0,
            price_per_week: 9000.0,
            price_per_month: 30000.0,
            seats: 2,
            features: vec!["Helmet included".to_string(), "Fuel efficient".to_string()],
            ..demo_vehicle("Bajaj CT100", VehicleType::Motorbike)
        },
        Vehicle {
            description: "Classic three-wheeler for short trips, with an optional driver.".to_string(),
            price_per_day: 3000.0,
            price_per_km: 30.0,
            price_per_week: 18000.0,
            price_per_month: 60000.0,
            driver_option: true,
            driver_price_per_day: 1000.0,
            seats: 3,
            features: vec!["City friendly".to_string()],
            ..demo_vehicle("Bajaj RE Three-Wheeler", VehicleType::ThreeWheeler)
        },
        Vehicle {
            description: "Compact automatic hatchback, easy to park and cheap to run.".to_string(),
            price_per_day: 7000.0,
            price_per_km: 45.0,
            price_per_week: 42000.0,
            price_per_month: 140000.0,
            driver_option: true,
            driver_price_per_day: 1500.0,
            transmission: "Automatic".to_string(),
            features: vec!["Air conditioning".to_string(), "Bluetooth audio".to_string()],
            ..demo_vehicle("Suzuki Alto", VehicleType::Car)
        },
        Vehicle {
            description: "Compact van that seats the whole family with room for luggage.".to_string(),
            price_per_day: 8000.0,
            price_per_km: 55.0,
            price_per_week: 48000.0,
            price_per_month: 160000.0,
            driver_option: true,
            driver_price_per_day: 1500.0,
            seats: 7,
            features: vec!["Air conditioning".to_string(), "Flexible seating".to_string()],
            ..demo_vehicle("Nissan Clipper", VehicleType::BuddyVan)
        },
        Vehicle {
            description: "Full-size passenger van for group tours and airport transfers.".to_string(),
            price_per_day: 12500.0,
            price_per_km: 70.0,
            price_per_week: 75000.0,
            price_per_month: 250000.0,
            driver_option: true,
            driver_price_per_day: 1500.0,
            seats: 14,
            transmission: "Automatic".to_string(),
            fuel_type: "Diesel".to_string(),
            features: vec![
                "Air conditioning".to_string(),
                "Dual AC".to_string(),
                "Reclining seats".to_string(),
            ],
            ..demo_vehicle("Toyota KDH High Roof", VehicleType::Van)
        },
    ]
}

fn demo_bookings(fleet: &[Vehicle]) -> Vec<Booking> {
    let van = &fleet[4];
    let buddy_van = &fleet[3];

    vec![
        Booking {
            id: Uuid::new_v4().to_string(),
            vehicle_id: van.id.clone(),
            customer_name: "John Perera".to_string(),
            phone_number: "0771234567".to_string(),
            nic: "199012345678".to_string(),
            start_date: date(2024, 2, 1),
            end_date: date(2024, 2, 5),
            number_of_days: 5,
            with_driver: true,
            total_price: 5.0 * van.price_per_day + 5.0 * van.driver_price_per_day,
            status: BookingStatus::Confirmed,
            request_key: None,
            created_at: date(2024, 1, 28).and_hms_opt(9, 30, 0).unwrap_or_default(),
        },
        Booking {
            id: Uuid::new_v4().to_string(),
            vehicle_id: buddy_van.id.clone(),
            customer_name: "Mary Silva".to_string(),
            phone_number: "0779876543".to_string(),
            nic: "198523456789".to_string(),
            start_date: date(2024, 2, 10),
            end_date: date(2024, 2, 12),
            number_of_days: 3,
            with_driver: false,
            total_price: 3.0 * buddy_van.price_per_day,
            status: BookingStatus::Pending,
            request_key: None,
            created_at: date(2024, 2, 1).and_hms_opt(14, 15, 0).unwrap_or_default(),
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
