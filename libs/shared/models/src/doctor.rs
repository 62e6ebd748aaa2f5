use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot fetched per view; the client never mutates doctors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub department: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Doctor {
    pub fn display_name(&self) -> String {
        format!("Dr. {}", self.name)
    }
}
