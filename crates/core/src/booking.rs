//! # Booking Guard and Status Lifecycle
//!
//! `attempt_book` refuses a booking when an active appointment already holds
//! the same doctor, date and time. The existence check gives a clean error for
//! the common case; the store's insert enforces the same rule atomically so
//! two concurrent requests cannot both win the slot.
//!
//! `set_status` moves an appointment to any of the five statuses. No
//! transition table is enforced: a completed appointment may be reopened.

use tracing::{info, warn};

use crate::{
    errors::{ClinicError, ClinicResult},
    models::appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest},
    store::{AppointmentStore, DoctorStore},
};

pub async fn attempt_book<S>(store: &S, request: CreateAppointmentRequest) -> ClinicResult<Appointment>
where
    S: DoctorStore + AppointmentStore + ?Sized,
{
    let mut appointment = request.validate()?;

    let doctor = store
        .get_doctor(appointment.doctor_id)
        .await?
        .filter(|doctor| doctor.is_active)
        .ok_or_else(|| {
            ClinicError::NotFound(format!("Doctor {} not found", appointment.doctor_id))
        })?;
    appointment.duration = doctor.consultation_duration;

    let existing = store
        .find_active_appointment(
            appointment.doctor_id,
            appointment.appointment_date,
            &appointment.appointment_time,
        )
        .await?;

    if let Some(existing_id) = existing {
        warn!(
            "Slot {} {} for doctor {} already held by appointment {}",
            appointment.appointment_date,
            appointment.appointment_time,
            appointment.doctor_id,
            existing_id
        );
        return Err(slot_taken(&appointment.appointment_date, &appointment.appointment_time));
    }

    let created = store.insert_appointment(&appointment).await.inspect_err(|e| {
        if matches!(e, ClinicError::SlotAlreadyBooked { .. }) {
            warn!(
                "Concurrent booking lost the race for doctor {} at {} {}",
                appointment.doctor_id, appointment.appointment_date, appointment.appointment_time
            );
        }
    })?;

    info!(
        "Appointment {} booked with doctor {} on {} at {}",
        created.id, created.doctor_id, created.appointment_date, created.appointment_time
    );

    Ok(created)
}

pub async fn set_status<S>(store: &S, appointment_id: i64, status: &str) -> ClinicResult<Appointment>
where
    S: AppointmentStore + ?Sized,
{
    let status: AppointmentStatus = status.trim().parse()?;

    let updated = store
        .update_status(appointment_id, status)
        .await?
        .ok_or(ClinicError::AppointmentNotFound(appointment_id))?;

    info!("Appointment {} is now {}", appointment_id, status);
    Ok(updated)
}

pub fn slot_taken(date: &impl ToString, time: &str) -> ClinicError {
    ClinicError::SlotAlreadyBooked {
        date: date.to_string(),
        time: time.to_string(),
    }
}
