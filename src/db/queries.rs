use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, DateRange, Vehicle, VehicleType};

const VEHICLE_COLUMNS: &str = "id, name, category, image, images, description, price_per_day, price_per_km, price_per_week, price_per_month, driver_option, driver_price_per_day, available, features, seats, transmission, fuel_type";

const BOOKING_COLUMNS: &str = "id, vehicle_id, customer_name, phone_number, nic, start_date, end_date, number_of_days, with_driver, total_price, status, request_key, created_at";

// ── Vehicles ──

pub fn insert_vehicle(conn: &Connection, vehicle: &Vehicle) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO vehicles (id, name, category, image, images, description, price_per_day, price_per_km, price_per_week, price_per_month, driver_option, driver_price_per_day, available, features, seats, transmission, fuel_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            vehicle.id,
            vehicle.name,
            vehicle.category.as_str(),
            vehicle.image,
            serde_json::to_string(&vehicle.images)?,
            vehicle.description,
            vehicle.price_per_day,
            vehicle.price_per_km,
            vehicle.price_per_week,
            vehicle.price_per_month,
            vehicle.driver_option as i32,
            vehicle.driver_price_per_day,
            vehicle.available as i32,
            serde_json::to_string(&vehicle.features)?,
            vehicle.seats,
            vehicle.transmission,
            vehicle.fuel_type,
        ],
    )?;
    Ok(())
}

/// Storefront filter set. Every field is optional; `None` means "all".
#[derive(Debug, Default)]
pub struct VehicleFilter {
    pub category: Option<VehicleType>,
    pub with_driver: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub available: Option<bool>,
    pub search: Option<String>,
}

pub fn list_vehicles(conn: &Connection, filter: &VehicleFilter) -> anyhow::Result<Vec<Vehicle>> {
    let mut sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];

    if let Some(category) = filter.category {
        sql.push_str(" AND category = ?");
        params_vec.push(Box::new(category.as_str().to_string()));
    }
    if let Some(with_driver) = filter.with_driver {
        sql.push_str(" AND driver_option = ?");
        params_vec.push(Box::new(with_driver as i32));
    }
    if let Some(min_price) = filter.min_price {
        sql.push_str(" AND price_per_day >= ?");
        params_vec.push(Box::new(min_price));
    }
    if let Some(max_price) = filter.max_price {
        sql.push_str(" AND price_per_day <= ?");
        params_vec.push(Box::new(max_price));
    }
    if let Some(available) = filter.available {
        sql.push_str(" AND available = ?");
        params_vec.push(Box::new(available as i32));
    }
    if let Some(search) = &filter.search {
        sql.push_str(" AND (LOWER(name) LIKE ? OR LOWER(category) LIKE ?)");
        let needle = format!("%{}%", search.to_lowercase());
        params_vec.push(Box::new(needle.clone()));
        params_vec.push(Box::new(needle));
    }

    // rowid order = insertion order, matching the original append-only list
    sql.push_str(" ORDER BY rowid ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_vehicle_row(row)))?;

    let mut vehicles = vec![];
    for row in rows {
        vehicles.push(row??);
    }
    Ok(vehicles)
}

pub fn get_vehicle(conn: &Connection, id: &str) -> anyhow::Result<Option<Vehicle>> {
    let result = conn.query_row(
        &format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?1"),
        params![id],
        |row| Ok(parse_vehicle_row(row)),
    );

    match result {
        Ok(vehicle) => Ok(Some(vehicle?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Full replace of the row with the vehicle's id. Reports whether a row
/// actually matched, so callers can distinguish updated from not-found.
pub fn update_vehicle(conn: &Connection, vehicle: &Vehicle) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE vehicles SET name = ?2, category = ?3, image = ?4, images = ?5, description = ?6, price_per_day = ?7, price_per_km = ?8, price_per_week = ?9, price_per_month = ?10, driver_option = ?11, driver_price_per_day = ?12, available = ?13, features = ?14, seats = ?15, transmission = ?16, fuel_type = ?17
         WHERE id = ?1",
        params![
            vehicle.id,
            vehicle.name,
            vehicle.category.as_str(),
            vehicle.image,
            serde_json::to_string(&vehicle.images)?,
            vehicle.description,
            vehicle.price_per_day,
            vehicle.price_per_km,
            vehicle.price_per_week,
            vehicle.price_per_month,
            vehicle.driver_option as i32,
            vehicle.driver_price_per_day,
            vehicle.available as i32,
            serde_json::to_string(&vehicle.features)?,
            vehicle.seats,
            vehicle.transmission,
            vehicle.fuel_type,
        ],
    )?;
    Ok(count > 0)
}

/// Bookings referencing the vehicle are deliberately left untouched; a
/// dangling vehicle_id is permitted and surfaced as a null vehicle in the
/// confirmation view.
pub fn delete_vehicle(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM vehicles WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

pub fn set_vehicle_availability(conn: &Connection, id: &str, available: bool) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE vehicles SET available = ?1 WHERE id = ?2",
        params![available as i32, id],
    )?;
    Ok(count > 0)
}

pub fn count_vehicles(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM vehicles", [], |row| row.get(0))?;
    Ok(count)
}

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, vehicle_id, customer_name, phone_number, nic, start_date, end_date, number_of_days, with_driver, total_price, status, request_key, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.id,
            booking.vehicle_id,
            booking.customer_name,
            booking.phone_number,
            booking.nic,
            booking.start_date.format("%Y-%m-%d").to_string(),
            booking.end_date.format("%Y-%m-%d").to_string(),
            booking.number_of_days,
            booking.with_driver as i32,
            booking.total_price,
            booking.status.as_str(),
            booking.request_key,
            booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_booking_by_request_key(conn: &Connection, key: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE request_key = ?1"),
        params![key],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_bookings(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = ?1 ORDER BY created_at DESC LIMIT ?2"
            ),
            vec![
                Box::new(status.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC LIMIT ?1"),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: &BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

/// The basis set for overlap testing: date ranges of every non-cancelled
/// booking of the vehicle.
pub fn booked_ranges_for_vehicle(
    conn: &Connection,
    vehicle_id: &str,
) -> anyhow::Result<Vec<DateRange>> {
    let mut stmt = conn.prepare(
        "SELECT start_date, end_date FROM bookings
         WHERE vehicle_id = ?1 AND status != 'cancelled' ORDER BY start_date ASC",
    )?;

    let rows = stmt.query_map(params![vehicle_id], |row| {
        let start: String = row.get(0)?;
        let end: String = row.get(1)?;
        Ok((start, end))
    })?;

    let mut ranges = vec![];
    for row in rows {
        let (start, end) = row?;
        ranges.push(DateRange::new(parse_date(&start), parse_date(&end)));
    }
    Ok(ranges)
}

// ── Dashboard ──

pub struct DashboardStats {
    pub total_vehicles: i64,
    pub available_vehicles: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub total_revenue: f64,
}

pub fn get_dashboard_stats(conn: &Connection) -> anyhow::Result<DashboardStats> {
    let total_vehicles: i64 = conn
        .query_row("SELECT COUNT(*) FROM vehicles", [], |row| row.get(0))
        .unwrap_or(0);

    let available_vehicles: i64 = conn
        .query_row("SELECT COUNT(*) FROM vehicles WHERE available = 1", [], |row| row.get(0))
        .unwrap_or(0);

    let total_bookings: i64 = conn
        .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))
        .unwrap_or(0);

    let pending_bookings: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM bookings WHERE status = 'pending'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Revenue counts confirmed and completed bookings only
    let total_revenue: f64 = conn
        .query_row(
            "SELECT COALESCE(SUM(total_price), 0) FROM bookings WHERE status IN ('confirmed', 'completed')",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0.0);

    Ok(DashboardStats {
        total_vehicles,
        available_vehicles,
        total_bookings,
        pending_bookings,
        total_revenue,
    })
}

// ── Row parsing ──

fn parse_vehicle_row(row: &rusqlite::Row) -> anyhow::Result<Vehicle> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let category_str: String = row.get(2)?;
    let image: String = row.get(3)?;
    let images_json: String = row.get(4)?;
    let description: String = row.get(5)?;
    let price_per_day: f64 = row.get(6)?;
    let price_per_km: f64 = row.get(7)?;
    let price_per_week: f64 = row.get(8)?;
    let price_per_month: f64 = row.get(9)?;
    let driver_option: bool = row.get::<_, i32>(10)? != 0;
    let driver_price_per_day: f64 = row.get(11)?;
    let available: bool = row.get::<_, i32>(12)? != 0;
    let features_json: String = row.get(13)?;
    let seats: i32 = row.get(14)?;
    let transmission: String = row.get(15)?;
    let fuel_type: String = row.get(16)?;

    Ok(Vehicle {
        id,
        name,
        category: VehicleType::from_str(&category_str).unwrap_or(VehicleType::Car),
        image,
        images: serde_json::from_str(&images_json).unwrap_or_default(),
        description,
        price_per_day,
        price_per_km,
        price_per_week,
        price_per_month,
        driver_option,
        driver_price_per_day,
        available,
        features: serde_json::from_str(&features_json).unwrap_or_default(),
        seats,
        transmission,
        fuel_type,
    })
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let vehicle_id: String = row.get(1)?;
    let customer_name: String = row.get(2)?;
    let phone_number: String = row.get(3)?;
    let nic: String = row.get(4)?;
    let start_date_str: String = row.get(5)?;
    let end_date_str: String = row.get(6)?;
    let number_of_days: i64 = row.get(7)?;
    let with_driver: bool = row.get::<_, i32>(8)? != 0;
    let total_price: f64 = row.get(9)?;
    let status_str: String = row.get(10)?;
    let request_key: Option<String> = row.get(11)?;
    let created_at_str: String = row.get(12)?;

    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id,
        vehicle_id,
        customer_name,
        phone_number,
        nic,
        start_date: parse_date(&start_date_str),
        end_date: parse_date(&end_date_str),
        number_of_days,
        with_driver,
        total_price,
        status: BookingStatus::from_str(&status_str),
        request_key,
        created_at,
    })
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|_| Utc::now().date_naive())
}
