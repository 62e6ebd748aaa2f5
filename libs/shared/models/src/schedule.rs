use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One bookable time unit of a doctor's schedule. Availability is
/// authoritative only as of fetch time; the server re-checks at booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: i64,
    pub doctor: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}
