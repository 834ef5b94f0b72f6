//! Storage seams consumed by the availability engine, the booking guard and
//! the HTTP handlers. `clinic-db` provides the Postgres and in-memory
//! implementations.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    errors::ClinicResult,
    models::{
        appointment::{
            Appointment, AppointmentFilter, AppointmentStatus, NewAppointment, PatientLookup,
        },
        doctor::{Doctor, DoctorFilter, NewDoctor},
        specialty::{NewSpecialty, Specialty},
    },
};

#[async_trait]
pub trait SpecialtyStore: Send + Sync {
    /// All specialties ordered by name.
    async fn list_specialties(&self) -> ClinicResult<Vec<Specialty>>;

    /// Fails with `ClinicError::Conflict` when the name is taken.
    async fn create_specialty(&self, specialty: &NewSpecialty) -> ClinicResult<Specialty>;
}

#[async_trait]
pub trait DoctorStore: Send + Sync {
    /// Doctors ordered by name, joined with their specialty.
    async fn list_doctors(&self, filter: DoctorFilter) -> ClinicResult<Vec<Doctor>>;

    async fn get_doctor(&self, id: i64) -> ClinicResult<Option<Doctor>>;

    /// Fails with `ClinicError::Conflict` when the email is taken.
    async fn create_doctor(&self, doctor: &NewDoctor) -> ClinicResult<Doctor>;

    /// Overwrites the stored doctor with the same id. `None` if it does not exist.
    async fn update_doctor(&self, doctor: &Doctor) -> ClinicResult<Option<Doctor>>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Id of a confirmed or pending appointment holding the slot, if any.
    async fn find_active_appointment(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        time: &str,
    ) -> ClinicResult<Option<i64>>;

    /// Persists a booking. Must fail with `ClinicError::SlotAlreadyBooked`,
    /// atomically with the insert, when an active appointment already holds
    /// the same doctor, date and time.
    async fn insert_appointment(&self, appointment: &NewAppointment) -> ClinicResult<Appointment>;

    async fn get_appointment(&self, id: i64) -> ClinicResult<Option<Appointment>>;

    /// Overwrites the status and `updated_at`. `None` if the id is unknown.
    async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> ClinicResult<Option<Appointment>>;

    async fn list_appointments(&self, filter: &AppointmentFilter) -> ClinicResult<Vec<Appointment>>;

    /// A patient's appointments, newest first.
    async fn find_patient_appointments(
        &self,
        lookup: &PatientLookup,
    ) -> ClinicResult<Vec<Appointment>>;

    /// Times held by active appointments for a doctor on a date.
    async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> ClinicResult<Vec<String>>;
}

/// Everything the API needs from storage, usable as `Arc<dyn ClinicStore>`.
pub trait ClinicStore: SpecialtyStore + DoctorStore + AppointmentStore {}

impl<T> ClinicStore for T where T: SpecialtyStore + DoctorStore + AppointmentStore + ?Sized {}
