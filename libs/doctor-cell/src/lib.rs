pub mod models;
pub mod services;

pub use models::{DaySchedule, ScheduleByDate};
pub use services::ScheduleService;
