use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive date range. Either endpoint may be absent, in which case the
/// range is treated as unbounded/unknown: it never overlaps anything and
/// counts zero rental days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Closed-interval overlap: A overlaps B iff A.start <= B.end and
    /// A.end >= B.start. Defined only when all four endpoints are present.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        match (self.start_date, self.end_date, other.start_date, other.end_date) {
            (Some(a_start), Some(a_end), Some(b_start), Some(b_end)) => {
                a_start <= b_end && a_end >= b_start
            }
            _ => false,
        }
    }

    /// Inclusive day count, minimum 1 for any bounded range (same-day
    /// rentals count one day). Unbounded ranges count zero.
    pub fn rental_days(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => ((end - start).num_days() + 1).max(1),
            _ => 0,
        }
    }
}
