use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    availability::canonical_time,
    errors::{ClinicError, ClinicResult},
    models::doctor::non_blank,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
    ];

    /// Statuses that occupy a slot.
    pub const ACTIVE: [AppointmentStatus; 2] =
        [AppointmentStatus::Confirmed, AppointmentStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// Wording used in the confirmation message after a status change.
    pub fn outcome(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "marked as pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "marked as no-show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ClinicError;

    fn from_str(s: &str) -> ClinicResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ClinicError::InvalidStatus(s.to_string()))
    }
}

/// An appointment joined with its doctor and specialty names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub duration: i32,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub doctor_name: Option<String>,
    pub specialty_name: Option<String>,
    pub specialty_icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub doctor_id: Option<i64>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_email: Option<String>,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated booking with its time canonicalised to `HH:MM`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub duration: i32,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    /// Checks required fields and formats. `duration` is filled in later from
    /// the doctor's consultation length.
    pub fn validate(self) -> ClinicResult<NewAppointment> {
        let patient_name = non_blank(self.patient_name);
        let patient_email = non_blank(self.patient_email);
        let patient_phone = non_blank(self.patient_phone);
        let date = non_blank(self.appointment_date);
        let time = non_blank(self.appointment_time);

        let (
            Some(doctor_id),
            Some(patient_name),
            Some(patient_email),
            Some(patient_phone),
            Some(date),
            Some(time),
        ) = (
            self.doctor_id,
            patient_name,
            patient_email,
            patient_phone,
            date,
            time,
        )
        else {
            return Err(ClinicError::Validation(
                "All required fields must be provided".to_string(),
            ));
        };

        Ok(NewAppointment {
            doctor_id,
            patient_name,
            patient_email,
            patient_phone,
            appointment_date: parse_date(&date)?,
            appointment_time: canonical_time(&time)?,
            duration: 0,
            status: AppointmentStatus::default(),
            reason: self.reason,
            notes: self.notes,
        })
    }
}

pub fn parse_date(value: &str) -> ClinicResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ClinicError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value))
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// Latest date and time first, as admins and patients see it.
    #[default]
    NewestFirst,
    /// Earliest first, as a doctor's agenda reads.
    Chronological,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub doctor_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    pub order: ListOrder,
}

/// How a patient is located: both fields must match when both are given,
/// either field otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientLookup {
    Email(String),
    Phone(String),
    EmailAndPhone { email: String, phone: String },
}

impl PatientLookup {
    pub fn new(email: Option<String>, phone: Option<String>) -> ClinicResult<Self> {
        match (non_blank(email), non_blank(phone)) {
            (Some(email), Some(phone)) => Ok(PatientLookup::EmailAndPhone { email, phone }),
            (Some(email), None) => Ok(PatientLookup::Email(email)),
            (None, Some(phone)) => Ok(PatientLookup::Phone(phone)),
            (None, None) => Err(ClinicError::Validation(
                "An email or phone number is required to search appointments".to_string(),
            )),
        }
    }

    pub fn matches(&self, email: &str, phone: &str) -> bool {
        match self {
            PatientLookup::Email(e) => e == email,
            PatientLookup::Phone(p) => p == phone,
            PatientLookup::EmailAndPhone { email: e, phone: p } => e == email && p == phone,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub appointment_id: i64,
    pub appointment: Appointment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    pub appointment: Appointment,
}
