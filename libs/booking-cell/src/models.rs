use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use shared_models::ApiError;

/// One-shot payload handed to the confirmation view through navigation
/// state. Assembled client-side from the held doctor and slot plus the
/// server's appointment id; never re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub appointment_id: i64,
    pub doctor_name: String,
    pub doctor_specialty: String,
    pub schedule_date: NaiveDate,
    pub schedule_start_time: NaiveTime,
}

/// State of one booking attempt. A fresh attempt always produces a fresh
/// outcome; terminal states are only left by an explicit transition.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingState {
    NoSelection,
    Selected { slot_id: i64 },
    Booking { slot_id: i64 },
    Confirmed(BookingConfirmation),
    Failed { slot_id: i64, error: ApiError },
}

impl BookingState {
    /// The armed selection, if any. `Failed` deliberately answers `None`:
    /// a failed attempt is not silently re-armed.
    pub fn selected_slot(&self) -> Option<i64> {
        match self {
            BookingState::Selected { slot_id } => Some(*slot_id),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingState::Confirmed(_) | BookingState::Failed { .. }
        )
    }
}
