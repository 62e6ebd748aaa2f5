pub mod confirmation;
pub mod models;
pub mod services;

pub use confirmation::ConfirmationView;
pub use models::{BookingConfirmation, BookingState};
pub use services::BookingFlow;
