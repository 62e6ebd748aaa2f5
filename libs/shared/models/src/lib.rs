pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod error;
pub mod schedule;

pub use appointment::{Appointment, AppointmentStatus};
pub use auth::{LoginRequest, LoginResponse, PatientProfile, RegisterRequest, UpdateProfileRequest};
pub use doctor::Doctor;
pub use error::ApiError;
pub use schedule::Slot;
