use serde::Serialize;

use crate::models::{DateRange, Vehicle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub number_of_days: i64,
    pub vehicle_cost: f64,
    pub driver_cost: f64,
    pub total: f64,
}

/// Tiered greedy decomposition over the rental's total day count: whole
/// months at the monthly rate, else whole weeks at the weekly rate, with the
/// remainder at the daily rate. Thresholds apply to the day count alone —
/// exactly 7 days is one week with zero remainder regardless of where the
/// span falls on the calendar. An unbounded range quotes zero.
pub fn quote(vehicle: &Vehicle, range: &DateRange, with_driver: bool) -> Quote {
    let days = range.rental_days();
    if days == 0 {
        return Quote {
            number_of_days: 0,
            vehicle_cost: 0.0,
            driver_cost: 0.0,
            total: 0.0,
        };
    }

    let vehicle_cost = if days >= 30 {
        let months = days / 30;
        let remainder = days % 30;
        months as f64 * vehicle.price_per_month + remainder as f64 * vehicle.price_per_day
    } else if days >= 7 {
        let weeks = days / 7;
        let remainder = days % 7;
        weeks as f64 * vehicle.price_per_week + remainder as f64 * vehicle.price_per_day
    } else {
        days as f64 * vehicle.price_per_day
    };

    let driver_cost = if with_driver {
        days as f64 * vehicle.driver_price_per_day
    } else {
        0.0
    };

    Quote {
        number_of_days: days,
        vehicle_cost,
        driver_cost,
        total: vehicle_cost + driver_cost,
    }
}
