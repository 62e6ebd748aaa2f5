use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use shared_gateway::ApiClient;
use shared_models::ApiError;

use crate::models::ScheduleByDate;

/// Fetches a doctor's slots and keeps the current date-grouped view. A
/// successful load replaces the held schedule wholesale; a failed one leaves
/// it untouched so a single bad refresh does not blank a valid picker.
pub struct ScheduleService {
    gateway: Arc<ApiClient>,
    current: Mutex<ScheduleByDate>,
}

impl ScheduleService {
    pub fn new(gateway: Arc<ApiClient>) -> Self {
        Self {
            gateway,
            current: Mutex::new(ScheduleByDate::default()),
        }
    }

    /// Without a date filter the full upcoming schedule is requested; with
    /// one, the server scopes the listing to that date. Grouping happens
    /// client-side either way.
    pub async fn load_schedule(
        &self,
        doctor_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<ScheduleByDate, ApiError> {
        debug!("Loading schedule for doctor {}", doctor_id);

        let slots = match self.gateway.get_schedules(doctor_id, date).await {
            Ok(slots) => slots,
            Err(err) => {
                warn!("Schedule fetch failed for doctor {}: {}", doctor_id, err);
                return Err(err);
            }
        };

        let grouped = ScheduleByDate::group(slots);
        debug!(
            "Fetched {} slots across {} dates for doctor {}",
            grouped.slot_count(),
            grouped.days().len(),
            doctor_id
        );

        *self.current.lock().unwrap() = grouped.clone();
        Ok(grouped)
    }

    pub fn current(&self) -> ScheduleByDate {
        self.current.lock().unwrap().clone()
    }
}
