use crate::models::BookingConfirmation;

/// Renders the booking summary from the payload delivered via navigation
/// state. Reaching the view without a preceding booking is valid: it
/// renders the defensive empty text instead of failing. No transitions
/// happen here.
pub struct ConfirmationView {
    payload: Option<BookingConfirmation>,
}

impl ConfirmationView {
    pub fn from_navigation(payload: Option<BookingConfirmation>) -> Self {
        Self { payload }
    }

    pub fn has_booking(&self) -> bool {
        self.payload.is_some()
    }

    pub fn render(&self) -> String {
        match &self.payload {
            Some(confirmation) => [
                "Appointment booked".to_string(),
                format!(
                    "Doctor: Dr. {} ({})",
                    confirmation.doctor_name, confirmation.doctor_specialty
                ),
                format!("Date: {}", confirmation.schedule_date),
                format!("Time: {}", confirmation.schedule_start_time),
                format!("Reference: #{}", confirmation.appointment_id),
            ]
            .join("\n"),
            None => "No appointment details to show.".to_string(),
        }
    }
}
