use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use doctor_cell::ScheduleByDate;
use shared_gateway::ApiClient;
use shared_models::{ApiError, Doctor, Slot};

use crate::models::{BookingConfirmation, BookingState};

/// Drives one booking attempt: tracks at most one selected slot, performs
/// the reservation, and lands in `Confirmed` or `Failed`. At most one
/// reservation is in flight per flow instance; the lock is never held
/// across the network call.
pub struct BookingFlow {
    gateway: Arc<ApiClient>,
    inner: Mutex<FlowInner>,
}

struct FlowInner {
    doctor: Doctor,
    schedule: ScheduleByDate,
    state: BookingState,
    // Bumped on abandon; a response that comes back under an older
    // generation is discarded instead of applied.
    generation: u64,
}

impl BookingFlow {
    pub fn new(gateway: Arc<ApiClient>, doctor: Doctor, schedule: ScheduleByDate) -> Self {
        Self {
            gateway,
            inner: Mutex::new(FlowInner {
                doctor,
                schedule,
                state: BookingState::NoSelection,
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> BookingState {
        self.inner.lock().unwrap().state.clone()
    }

    pub fn selected_slot(&self) -> Option<i64> {
        self.inner.lock().unwrap().state.selected_slot()
    }

    /// Arm a slot. Rejected without touching the state when the slot is not
    /// part of the held schedule, is marked unavailable, or a reservation is
    /// currently in flight. Selecting the already-selected slot is a no-op;
    /// selecting another slot silently replaces the previous choice.
    pub fn select_slot(&self, slot_id: i64) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();

        if matches!(inner.state, BookingState::Booking { .. }) {
            return Err(ApiError::Validation(
                "a reservation is already in flight".to_string(),
            ));
        }

        let slot = inner.schedule.find_slot(slot_id).ok_or_else(|| {
            ApiError::Validation(format!("slot {} is not part of the current schedule", slot_id))
        })?;
        if !slot.is_available {
            return Err(ApiError::Validation(format!(
                "slot {} is no longer available",
                slot_id
            )));
        }

        inner.state = BookingState::Selected { slot_id };
        Ok(())
    }

    /// Back to `NoSelection` from any settled state; a no-op while a
    /// reservation is in flight (it cannot be cancelled client-side).
    pub fn clear_selection(&self) {
        let mut inner = self.inner.lock().unwrap();
        if !matches!(inner.state, BookingState::Booking { .. }) {
            inner.state = BookingState::NoSelection;
        }
    }

    /// Explicit re-arm after a failure: `Failed` back to `Selected` with the
    /// same slot. Submission stays a separate, deliberate step.
    pub fn retry(&self) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.state {
            BookingState::Failed { slot_id, .. } => {
                inner.state = BookingState::Selected { slot_id };
                Ok(())
            }
            _ => Err(ApiError::Validation(
                "there is no failed booking to retry".to_string(),
            )),
        }
    }

    /// Reserve the selected slot. Valid only from `Selected`; while the
    /// request is outstanding further submits are rejected, not queued, so
    /// repeated clicks cannot double-book. The server stays the final
    /// arbiter: a slot that looked free can still come back as a conflict.
    pub async fn submit(&self) -> Result<BookingConfirmation, ApiError> {
        let (slot, doctor, generation) = self.begin_submit()?;
        let slot_id = slot.id;

        debug!("Submitting reservation for slot {}", slot_id);
        let result = self.gateway.create_appointment(slot_id).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            debug!("Discarding reservation response for abandoned flow");
            return Err(ApiError::Validation(
                "the booking flow was abandoned".to_string(),
            ));
        }

        match result {
            Ok(appointment) => {
                let confirmation = BookingConfirmation {
                    appointment_id: appointment.id,
                    doctor_name: doctor.name,
                    doctor_specialty: doctor.specialty,
                    schedule_date: slot.date,
                    schedule_start_time: slot.start_time,
                };
                // Entering Confirmed is what clears the selection; there is
                // no window where both exist.
                inner.state = BookingState::Confirmed(confirmation.clone());
                debug!("Slot {} confirmed as appointment {}", slot_id, confirmation.appointment_id);
                Ok(confirmation)
            }
            Err(err) => {
                warn!("Reservation for slot {} failed: {}", slot_id, err);
                inner.state = BookingState::Failed {
                    slot_id,
                    error: err.clone(),
                };
                Err(err)
            }
        }
    }

    /// Navigation away from the booking view: drop the selection and
    /// invalidate the generation so a response still in flight is discarded
    /// rather than applied to a view the user has left.
    pub fn abandon(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.state = BookingState::NoSelection;
    }

    /// One-shot handoff of the confirmation payload to the next view;
    /// taking it leaves the flow back at `NoSelection`.
    pub fn take_confirmation(&self) -> Option<BookingConfirmation> {
        let mut inner = self.inner.lock().unwrap();
        match &inner.state {
            BookingState::Confirmed(confirmation) => {
                let confirmation = confirmation.clone();
                inner.state = BookingState::NoSelection;
                Some(confirmation)
            }
            _ => None,
        }
    }

    fn begin_submit(&self) -> Result<(Slot, Doctor, u64), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.state {
            BookingState::Selected { slot_id } => {
                let slot = inner
                    .schedule
                    .find_slot(slot_id)
                    .cloned()
                    .ok_or_else(|| {
                        ApiError::Validation(format!(
                            "slot {} is not part of the current schedule",
                            slot_id
                        ))
                    })?;
                inner.state = BookingState::Booking { slot_id };
                Ok((slot, inner.doctor.clone(), inner.generation))
            }
            BookingState::Booking { .. } => Err(ApiError::Validation(
                "a reservation is already in flight".to_string(),
            )),
            _ => Err(ApiError::Validation("no slot selected".to_string())),
        }
    }
}
