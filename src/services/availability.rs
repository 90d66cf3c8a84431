use rusqlite::Connection;

use crate::db::queries;
use crate::models::DateRange;

pub fn booked_dates_for_vehicle(
    conn: &Connection,
    vehicle_id: &str,
) -> anyhow::Result<Vec<DateRange>> {
    queries::booked_ranges_for_vehicle(conn, vehicle_id)
}

/// True when no non-cancelled booking of the vehicle overlaps the candidate
/// range under the closed-interval rule. A candidate with either endpoint
/// absent is vacuously available. Pure query; mutates nothing.
pub fn is_vehicle_available(
    conn: &Connection,
    vehicle_id: &str,
    range: &DateRange,
) -> anyhow::Result<bool> {
    if !range.is_bounded() {
        return Ok(true);
    }

    let booked = queries::booked_ranges_for_vehicle(conn, vehicle_id)?;
    Ok(!booked.iter().any(|b| b.overlaps(range)))
}
