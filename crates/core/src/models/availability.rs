use serde::{Deserialize, Serialize};

use crate::models::doctor::DoctorSummary;

/// A doctor's daily working hours and consultation length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingWindow {
    pub start: String,
    pub end: String,
    pub slot_duration_minutes: i32,
}

/// A bookable time: `time` is 24h `HH:MM`, `display` is `h:mm AM|PM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: String,
    pub display: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub doctor: DoctorSummary,
    pub available_slots: Vec<Slot>,
    pub booked_slots: Vec<String>,
}
