use chrono::{DateTime, NaiveDate, Utc};
use clinic_core::{
    errors::{ClinicError, ClinicResult},
    models::{appointment::Appointment, doctor::Doctor, specialty::Specialty},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSpecialty {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbSpecialty> for Specialty {
    fn from(row: DbSpecialty) -> Self {
        Specialty {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            created_at: row.created_at,
        }
    }
}

/// A doctor row joined with its specialty.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
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
    pub available_days: String,
    pub fee: f64,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub specialty_name: Option<String>,
    pub specialty_icon: Option<String>,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            name: row.name,
            specialty_id: row.specialty_id,
            email: row.email,
            phone: row.phone,
            photo_url: row.photo_url,
            experience_years: row.experience_years,
            consultation_duration: row.consultation_duration,
            working_hours_start: row.working_hours_start,
            working_hours_end: row.working_hours_end,
            available_days: row.available_days,
            fee: row.fee,
            bio: row.bio,
            is_active: row.is_active,
            created_at: row.created_at,
            specialty_name: row.specialty_name,
            specialty_icon: row.specialty_icon,
        }
    }
}

/// An appointment row joined with doctor and specialty names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub duration: i32,
    pub status: String,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub doctor_name: Option<String>,
    pub specialty_name: Option<String>,
    pub specialty_icon: Option<String>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = ClinicError;

    fn try_from(row: DbAppointment) -> ClinicResult<Self> {
        let status = row.status.parse().map_err(|_| {
            ClinicError::Database(eyre::eyre!(
                "Appointment {} has unknown stored status '{}'",
                row.id,
                row.status
            ))
        })?;

        Ok(Appointment {
            id: row.id,
            doctor_id: row.doctor_id,
            patient_name: row.patient_name,
            patient_email: row.patient_email,
            patient_phone: row.patient_phone,
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            duration: row.duration,
            status,
            reason: row.reason,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            doctor_name: row.doctor_name,
            specialty_name: row.specialty_name,
            specialty_icon: row.specialty_icon,
        })
    }
}
