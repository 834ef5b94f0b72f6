//! In-process implementation of the store traits.
//!
//! All state sits behind one mutex, so the booking check and the insert in
//! `insert_appointment` happen in the same critical section and two
//! concurrent bookings of a slot cannot both succeed.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use clinic_core::{
    booking::slot_taken,
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{
            Appointment, AppointmentFilter, AppointmentStatus, ListOrder, NewAppointment,
            PatientLookup,
        },
        doctor::{DEFAULT_AVAILABLE_DAYS, DEFAULT_PHOTO_URL, Doctor, DoctorFilter, NewDoctor},
        specialty::{NewSpecialty, Specialty},
    },
    store::{AppointmentStore, DoctorStore, SpecialtyStore},
};

use crate::{
    seed::{SAMPLE_DOCTORS, SAMPLE_SPECIALTIES},
    store::unknown_specialty,
};

#[derive(Debug, Default)]
struct MemoryState {
    specialties: Vec<Specialty>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    next_specialty_id: i64,
    next_doctor_id: i64,
    next_appointment_id: i64,
}

impl MemoryState {
    fn specialty(&self, id: Option<i64>) -> Option<&Specialty> {
        id.and_then(|id| self.specialties.iter().find(|s| s.id == id))
    }

    fn joined_doctor(&self, doctor: &Doctor) -> Doctor {
        let specialty = self.specialty(doctor.specialty_id);
        Doctor {
            specialty_name: specialty.map(|s| s.name.clone()),
            specialty_icon: specialty.map(|s| s.icon.clone()),
            ..doctor.clone()
        }
    }

    fn joined_appointment(&self, appointment: &Appointment) -> Appointment {
        let doctor = self.doctors.iter().find(|d| d.id == appointment.doctor_id);
        let specialty = self.specialty(doctor.and_then(|d| d.specialty_id));
        Appointment {
            doctor_name: doctor.map(|d| d.name.clone()),
            specialty_name: specialty.map(|s| s.name.clone()),
            specialty_icon: specialty.map(|s| s.icon.clone()),
            ..appointment.clone()
        }
    }

    fn slot_held(&self, doctor_id: i64, date: NaiveDate, time: &str, except: Option<i64>) -> Option<i64> {
        self.appointments
            .iter()
            .find(|a| {
                Some(a.id) != except
                    && a.doctor_id == doctor_id
                    && a.appointment_date == date
                    && a.appointment_time == time
                    && a.status.is_active()
            })
            .map(|a| a.id)
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.doctors
            .iter()
            .any(|d| Some(d.id) != except && d.email == email)
    }

    fn sorted(&self, mut appointments: Vec<Appointment>, order: ListOrder) -> Vec<Appointment> {
        appointments.sort_by(|a, b| {
            let key = (a.appointment_date, &a.appointment_time).cmp(&(b.appointment_date, &b.appointment_time));
            match order {
                ListOrder::Chronological => key,
                ListOrder::NewestFirst => key.reverse(),
            }
        });
        appointments
            .iter()
            .map(|a| self.joined_appointment(a))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the sample specialties and doctors.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let now = Utc::now();

            for sample in &SAMPLE_SPECIALTIES {
                state.next_specialty_id += 1;
                let id = state.next_specialty_id;
                state.specialties.push(Specialty {
                    id,
                    name: sample.name.to_string(),
                    description: Some(sample.description.to_string()),
                    icon: sample.icon.to_string(),
                    created_at: now,
                });
            }

            for sample in &SAMPLE_DOCTORS {
                let specialty_id = state
                    .specialties
                    .iter()
                    .find(|s| s.name == sample.specialty)
                    .map(|s| s.id);
                state.next_doctor_id += 1;
                let id = state.next_doctor_id;
                state.doctors.push(Doctor {
                    id,
                    name: sample.name.to_string(),
                    specialty_id,
                    email: sample.email.to_string(),
                    phone: Some(sample.phone.to_string()),
                    photo_url: DEFAULT_PHOTO_URL.to_string(),
                    experience_years: sample.experience_years,
                    consultation_duration: sample.consultation_duration,
                    working_hours_start: sample.working_hours_start.to_string(),
                    working_hours_end: sample.working_hours_end.to_string(),
                    available_days: DEFAULT_AVAILABLE_DAYS.to_string(),
                    fee: sample.fee,
                    bio: Some(sample.bio.to_string()),
                    is_active: true,
                    created_at: now,
                    specialty_name: None,
                    specialty_icon: None,
                });
            }
        }
        store
    }

    fn state(&self) -> ClinicResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| ClinicError::Database(eyre::eyre!("memory store lock poisoned")))
    }
}

#[async_trait]
impl SpecialtyStore for MemoryStore {
    async fn list_specialties(&self) -> ClinicResult<Vec<Specialty>> {
        let state = self.state()?;
        let mut specialties = state.specialties.clone();
        specialties.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specialties)
    }

    async fn create_specialty(&self, new: &NewSpecialty) -> ClinicResult<Specialty> {
        let mut state = self.state()?;
        if state.specialties.iter().any(|s| s.name == new.name) {
            return Err(ClinicError::Conflict(format!(
                "A specialty named '{}' already exists",
                new.name
            )));
        }

        state.next_specialty_id += 1;
        let specialty = Specialty {
            id: state.next_specialty_id,
            name: new.name.clone(),
            description: new.description.clone(),
            icon: new.icon.clone(),
            created_at: Utc::now(),
        };
        state.specialties.push(specialty.clone());
        Ok(specialty)
    }
}

#[async_trait]
impl DoctorStore for MemoryStore {
    async fn list_doctors(&self, filter: DoctorFilter) -> ClinicResult<Vec<Doctor>> {
        let state = self.state()?;
        let mut doctors: Vec<Doctor> = state
            .doctors
            .iter()
            .filter(|d| filter.include_inactive || d.is_active)
            .filter(|d| filter.specialty_id.is_none() || d.specialty_id == filter.specialty_id)
            .map(|d| state.joined_doctor(d))
            .collect();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(doctors)
    }

    async fn get_doctor(&self, id: i64) -> ClinicResult<Option<Doctor>> {
        let state = self.state()?;
        Ok(state
            .doctors
            .iter()
            .find(|d| d.id == id)
            .map(|d| state.joined_doctor(d)))
    }

    async fn create_doctor(&self, new: &NewDoctor) -> ClinicResult<Doctor> {
        let mut state = self.state()?;
        if state.specialty(Some(new.specialty_id)).is_none() {
            return Err(unknown_specialty(Some(new.specialty_id)));
        }
        if state.email_taken(&new.email, None) {
            return Err(ClinicError::Conflict(format!(
                "A doctor with email '{}' already exists",
                new.email
            )));
        }

        state.next_doctor_id += 1;
        let doctor = Doctor {
            id: state.next_doctor_id,
            name: new.name.clone(),
            specialty_id: Some(new.specialty_id),
            email: new.email.clone(),
            phone: new.phone.clone(),
            photo_url: new.photo_url.clone(),
            experience_years: new.experience_years,
            consultation_duration: new.consultation_duration,
            working_hours_start: new.working_hours_start.clone(),
            working_hours_end: new.working_hours_end.clone(),
            available_days: new.available_days.clone(),
            fee: new.fee,
            bio: new.bio.clone(),
            is_active: true,
            created_at: Utc::now(),
            specialty_name: None,
            specialty_icon: None,
        };
        state.doctors.push(doctor.clone());
        Ok(state.joined_doctor(&doctor))
    }

    async fn update_doctor(&self, updated: &Doctor) -> ClinicResult<Option<Doctor>> {
        let mut state = self.state()?;
        if updated.specialty_id.is_some() && state.specialty(updated.specialty_id).is_none() {
            return Err(unknown_specialty(updated.specialty_id));
        }
        if state.email_taken(&updated.email, Some(updated.id)) {
            return Err(ClinicError::Conflict(format!(
                "A doctor with email '{}' already exists",
                updated.email
            )));
        }

        let Some(index) = state.doctors.iter().position(|d| d.id == updated.id) else {
            return Ok(None);
        };
        let created_at = state.doctors[index].created_at;
        state.doctors[index] = Doctor {
            created_at,
            ..updated.clone()
        };
        Ok(Some(state.joined_doctor(&state.doctors[index])))
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn find_active_appointment(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        time: &str,
    ) -> ClinicResult<Option<i64>> {
        Ok(self.state()?.slot_held(doctor_id, date, time, None))
    }

    async fn insert_appointment(&self, new: &NewAppointment) -> ClinicResult<Appointment> {
        let mut state = self.state()?;
        if new.status.is_active()
            && state
                .slot_held(new.doctor_id, new.appointment_date, &new.appointment_time, None)
                .is_some()
        {
            return Err(slot_taken(&new.appointment_date, &new.appointment_time));
        }

        state.next_appointment_id += 1;
        let now = Utc::now();
        let appointment = Appointment {
            id: state.next_appointment_id,
            doctor_id: new.doctor_id,
            patient_name: new.patient_name.clone(),
            patient_email: new.patient_email.clone(),
            patient_phone: new.patient_phone.clone(),
            appointment_date: new.appointment_date,
            appointment_time: new.appointment_time.clone(),
            duration: new.duration,
            status: new.status,
            reason: new.reason.clone(),
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
            doctor_name: None,
            specialty_name: None,
            specialty_icon: None,
        };
        state.appointments.push(appointment.clone());
        Ok(state.joined_appointment(&appointment))
    }

    async fn get_appointment(&self, id: i64) -> ClinicResult<Option<Appointment>> {
        let state = self.state()?;
        Ok(state
            .appointments
            .iter()
            .find(|a| a.id == id)
            .map(|a| state.joined_appointment(a)))
    }

    async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> ClinicResult<Option<Appointment>> {
        let mut state = self.state()?;
        let Some(index) = state.appointments.iter().position(|a| a.id == id) else {
            return Ok(None);
        };

        let current = &state.appointments[index];
        if status.is_active()
            && state
                .slot_held(current.doctor_id, current.appointment_date, &current.appointment_time, Some(id))
                .is_some()
        {
            return Err(ClinicError::Conflict(format!(
                "Appointment {} cannot become {}: its slot has been booked again",
                id, status
            )));
        }

        let appointment = &mut state.appointments[index];
        appointment.status = status;
        appointment.updated_at = Utc::now();
        let appointment = appointment.clone();
        Ok(Some(state.joined_appointment(&appointment)))
    }

    async fn list_appointments(&self, filter: &AppointmentFilter) -> ClinicResult<Vec<Appointment>> {
        let state = self.state()?;
        let matching = state
            .appointments
            .iter()
            .filter(|a| filter.doctor_id.is_none_or(|id| a.doctor_id == id))
            .filter(|a| filter.status.is_none_or(|status| a.status == status))
            .filter(|a| filter.date.is_none_or(|date| a.appointment_date == date))
            .cloned()
            .collect();
        Ok(state.sorted(matching, filter.order))
    }

    async fn find_patient_appointments(
        &self,
        lookup: &PatientLookup,
    ) -> ClinicResult<Vec<Appointment>> {
        let state = self.state()?;
        let matching = state
            .appointments
            .iter()
            .filter(|a| lookup.matches(&a.patient_email, &a.patient_phone))
            .cloned()
            .collect();
        Ok(state.sorted(matching, ListOrder::NewestFirst))
    }

    async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> ClinicResult<Vec<String>> {
        let state = self.state()?;
        let mut times: Vec<String> = state
            .appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id && a.appointment_date == date && a.status.is_active())
            .map(|a| a.appointment_time.clone())
            .collect();
        times.sort();
        Ok(times)
    }
}
