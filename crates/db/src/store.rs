//! Postgres-backed implementation of the `clinic_core::store` traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use clinic_core::{
    booking::slot_taken,
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{
            Appointment, AppointmentFilter, AppointmentStatus, NewAppointment, PatientLookup,
        },
        doctor::{Doctor, DoctorFilter, NewDoctor},
        specialty::{NewSpecialty, Specialty},
    },
    store::{AppointmentStore, DoctorStore, SpecialtyStore},
};

use crate::{
    DbPool,
    models::DbAppointment,
    repositories::{appointment, doctor, specialty},
    schema::{
        ACTIVE_SLOT_INDEX, DOCTOR_EMAIL_CONSTRAINT, DOCTOR_SPECIALTY_CONSTRAINT,
        SPECIALTY_NAME_CONSTRAINT,
    },
};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Clone)]
pub struct PgClinicStore {
    pool: DbPool,
}

impl PgClinicStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn is_violation(report: &eyre::Report, code: &str, constraint: &str) -> bool {
    report
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db_err| {
            db_err.code().as_deref() == Some(code) && db_err.constraint() == Some(constraint)
        })
}

/// True when `report` wraps a Postgres unique violation on `constraint`.
pub fn is_unique_violation(report: &eyre::Report, constraint: &str) -> bool {
    is_violation(report, UNIQUE_VIOLATION, constraint)
}

/// True when `report` wraps a Postgres foreign key violation on `constraint`.
pub fn is_foreign_key_violation(report: &eyre::Report, constraint: &str) -> bool {
    is_violation(report, FOREIGN_KEY_VIOLATION, constraint)
}

/// Maps the caller-correctable failures of a doctor insert or update.
fn doctor_write_error(report: eyre::Report, email: &str, specialty_id: Option<i64>) -> ClinicError {
    if is_unique_violation(&report, DOCTOR_EMAIL_CONSTRAINT) {
        ClinicError::Conflict(format!("A doctor with email '{}' already exists", email))
    } else if is_foreign_key_violation(&report, DOCTOR_SPECIALTY_CONSTRAINT) {
        unknown_specialty(specialty_id)
    } else {
        ClinicError::Database(report)
    }
}

pub fn unknown_specialty(specialty_id: Option<i64>) -> ClinicError {
    match specialty_id {
        Some(id) => ClinicError::Validation(format!("Specialty {} does not exist", id)),
        None => ClinicError::Validation("Specialty does not exist".to_string()),
    }
}

fn to_appointments(rows: Vec<DbAppointment>) -> ClinicResult<Vec<Appointment>> {
    rows.into_iter().map(Appointment::try_from).collect()
}

#[async_trait]
impl SpecialtyStore for PgClinicStore {
    async fn list_specialties(&self) -> ClinicResult<Vec<Specialty>> {
        let rows = specialty::list_specialties(&self.pool).await?;
        Ok(rows.into_iter().map(Specialty::from).collect())
    }

    async fn create_specialty(&self, new: &NewSpecialty) -> ClinicResult<Specialty> {
        specialty::create_specialty(&self.pool, &new.name, new.description.as_deref(), &new.icon)
            .await
            .map(Specialty::from)
            .map_err(|report| {
                if is_unique_violation(&report, SPECIALTY_NAME_CONSTRAINT) {
                    ClinicError::Conflict(format!("A specialty named '{}' already exists", new.name))
                } else {
                    ClinicError::Database(report)
                }
            })
    }
}

#[async_trait]
impl DoctorStore for PgClinicStore {
    async fn list_doctors(&self, filter: DoctorFilter) -> ClinicResult<Vec<Doctor>> {
        let rows =
            doctor::list_doctors(&self.pool, filter.specialty_id, filter.include_inactive).await?;
        Ok(rows.into_iter().map(Doctor::from).collect())
    }

    async fn get_doctor(&self, id: i64) -> ClinicResult<Option<Doctor>> {
        let row = doctor::get_doctor_by_id(&self.pool, id).await?;
        Ok(row.map(Doctor::from))
    }

    async fn create_doctor(&self, new: &NewDoctor) -> ClinicResult<Doctor> {
        doctor::create_doctor(&self.pool, new)
            .await
            .map(Doctor::from)
            .map_err(|report| doctor_write_error(report, &new.email, Some(new.specialty_id)))
    }

    async fn update_doctor(&self, updated: &Doctor) -> ClinicResult<Option<Doctor>> {
        doctor::update_doctor(&self.pool, updated)
            .await
            .map(|row| row.map(Doctor::from))
            .map_err(|report| doctor_write_error(report, &updated.email, updated.specialty_id))
    }
}

#[async_trait]
impl AppointmentStore for PgClinicStore {
    async fn find_active_appointment(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        time: &str,
    ) -> ClinicResult<Option<i64>> {
        Ok(appointment::find_active_appointment_id(&self.pool, doctor_id, date, time).await?)
    }

    async fn insert_appointment(&self, new: &NewAppointment) -> ClinicResult<Appointment> {
        let row = appointment::insert_appointment(&self.pool, new)
            .await
            .map_err(|report| {
                if is_unique_violation(&report, ACTIVE_SLOT_INDEX) {
                    slot_taken(&new.appointment_date, &new.appointment_time)
                } else {
                    ClinicError::Database(report)
                }
            })?;

        Appointment::try_from(row)
    }

    async fn get_appointment(&self, id: i64) -> ClinicResult<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> ClinicResult<Option<Appointment>> {
        // Reactivating a cancelled booking can collide with a newer one on the same slot.
        appointment::update_appointment_status(&self.pool, id, status)
            .await
            .map_err(|report| {
                if is_unique_violation(&report, ACTIVE_SLOT_INDEX) {
                    ClinicError::Conflict(format!(
                        "Appointment {} cannot become {}: its slot has been booked again",
                        id, status
                    ))
                } else {
                    ClinicError::Database(report)
                }
            })?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn list_appointments(&self, filter: &AppointmentFilter) -> ClinicResult<Vec<Appointment>> {
        to_appointments(appointment::list_appointments(&self.pool, filter).await?)
    }

    async fn find_patient_appointments(
        &self,
        lookup: &PatientLookup,
    ) -> ClinicResult<Vec<Appointment>> {
        to_appointments(appointment::find_patient_appointments(&self.pool, lookup).await?)
    }

    async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> ClinicResult<Vec<String>> {
        Ok(appointment::get_booked_times(&self.pool, doctor_id, date).await?)
    }
}
