use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    availability::validate_working_hours,
    errors::{ClinicError, ClinicResult},
    models::availability::WorkingWindow,
};

pub const DEFAULT_PHOTO_URL: &str = "/assets/images/doctor-default.jpg";
pub const DEFAULT_EXPERIENCE_YEARS: i32 = 5;
pub const DEFAULT_CONSULTATION_DURATION: i32 = 30;
pub const DEFAULT_WORKING_HOURS_START: &str = "09:00";
pub const DEFAULT_WORKING_HOURS_END: &str = "18:00";
pub const DEFAULT_AVAILABLE_DAYS: &str = "1,2,3,4,5";
pub const DEFAULT_FEE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty_id: Option<i64>,
    pub email: String,
    pub phone: Option<String>,
    pub photo_url: String,
    pub experience_years: i32,
    pub consultation_duration: i32,
    pub working_hours_start: String,
    pub working_hours_end: String,
    /// Comma separated ISO weekday numbers, Monday = 1.
    pub available_days: String,
    pub fee: f64,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub specialty_name: Option<String>,
    pub specialty_icon: Option<String>,
}

impl Doctor {
    pub fn working_window(&self) -> WorkingWindow {
        WorkingWindow {
            start: self.working_hours_start.clone(),
            end: self.working_hours_end.clone(),
            slot_duration_minutes: self.consultation_duration,
        }
    }

    pub fn summary(&self) -> DoctorSummary {
        DoctorSummary {
            id: self.id,
            name: self.name.clone(),
            specialty_id: self.specialty_id,
            working_hours_start: self.working_hours_start.clone(),
            working_hours_end: self.working_hours_end.clone(),
            consultation_duration: self.consultation_duration,
        }
    }
}

/// The slice of a doctor echoed back alongside availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: i64,
    pub name: String,
    pub specialty_id: Option<i64>,
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub consultation_duration: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub specialty_id: Option<i64>,
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialty_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub experience_years: Option<i32>,
    #[serde(default)]
    pub consultation_duration: Option<i32>,
    #[serde(default)]
    pub working_hours_start: Option<String>,
    #[serde(default)]
    pub working_hours_end: Option<String>,
    #[serde(default)]
    pub available_days: Option<String>,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// A validated doctor ready for insertion, defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDoctor {
    pub name: String,
    pub specialty_id: i64,
    pub email: String,
    pub phone: Option<String>,
    pub photo_url: String,
    pub experience_years: i32,
    pub consultation_duration: i32,
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub available_days: String,
    pub fee: f64,
    pub bio: Option<String>,
}

impl TryFrom<CreateDoctorRequest> for NewDoctor {
    type Error = ClinicError;

    fn try_from(request: CreateDoctorRequest) -> ClinicResult<Self> {
        let name = non_blank(request.name);
        let email = non_blank(request.email);
        let (Some(name), Some(specialty_id), Some(email)) = (name, request.specialty_id, email)
        else {
            return Err(ClinicError::Validation(
                "Name, specialty and email are required".to_string(),
            ));
        };

        let doctor = Self {
            name,
            specialty_id,
            email,
            phone: request.phone,
            photo_url: request
                .photo_url
                .unwrap_or_else(|| DEFAULT_PHOTO_URL.to_string()),
            experience_years: request.experience_years.unwrap_or(DEFAULT_EXPERIENCE_YEARS),
            consultation_duration: request
                .consultation_duration
                .unwrap_or(DEFAULT_CONSULTATION_DURATION),
            working_hours_start: request
                .working_hours_start
                .unwrap_or_else(|| DEFAULT_WORKING_HOURS_START.to_string()),
            working_hours_end: request
                .working_hours_end
                .unwrap_or_else(|| DEFAULT_WORKING_HOURS_END.to_string()),
            available_days: request
                .available_days
                .unwrap_or_else(|| DEFAULT_AVAILABLE_DAYS.to_string()),
            fee: request.fee.unwrap_or(DEFAULT_FEE),
            bio: request.bio,
        };

        validate_working_hours(
            &doctor.working_hours_start,
            &doctor.working_hours_end,
            doctor.consultation_duration,
        )?;

        Ok(doctor)
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialty_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub experience_years: Option<i32>,
    pub consultation_duration: Option<i32>,
    pub working_hours_start: Option<String>,
    pub working_hours_end: Option<String>,
    pub available_days: Option<String>,
    pub fee: Option<f64>,
    pub bio: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateDoctorRequest {
    /// Applies the update on top of `doctor`, validating the resulting schedule.
    pub fn apply_to(self, mut doctor: Doctor) -> ClinicResult<Doctor> {
        if let Some(name) = non_blank(self.name) {
            doctor.name = name;
        }
        if let Some(specialty_id) = self.specialty_id {
            doctor.specialty_id = Some(specialty_id);
        }
        if let Some(email) = non_blank(self.email) {
            doctor.email = email;
        }
        if self.phone.is_some() {
            doctor.phone = self.phone;
        }
        if let Some(photo_url) = self.photo_url {
            doctor.photo_url = photo_url;
        }
        if let Some(years) = self.experience_years {
            doctor.experience_years = years;
        }
        if let Some(duration) = self.consultation_duration {
            doctor.consultation_duration = duration;
        }
        if let Some(start) = self.working_hours_start {
            doctor.working_hours_start = start;
        }
        if let Some(end) = self.working_hours_end {
            doctor.working_hours_end = end;
        }
        if let Some(days) = self.available_days {
            doctor.available_days = days;
        }
        if let Some(fee) = self.fee {
            doctor.fee = fee;
        }
        if self.bio.is_some() {
            doctor.bio = self.bio;
        }
        if let Some(is_active) = self.is_active {
            doctor.is_active = is_active;
        }

        validate_working_hours(
            &doctor.working_hours_start,
            &doctor.working_hours_end,
            doctor.consultation_duration,
        )?;

        Ok(doctor)
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
