//! # Availability Engine
//!
//! Turns a doctor's working window into the list of slots a patient can still
//! book on a given day.
//!
//! ## Slot Generation
//!
//! 1. Both ends of the window must be 24h `H:MM`/`HH:MM` times, otherwise the
//!    call fails with `InvalidTimeFormat`
//! 2. The consultation length must be positive, otherwise the call fails with
//!    `InvalidConfiguration`
//! 3. An empty or inverted window (`start >= end`) yields no slots
//! 4. Starting at `start`, a slot is produced every `duration` minutes as long
//!    as the whole consultation still ends by `end`
//! 5. Slots whose `HH:MM` time is already booked are skipped
//!
//! Slots come out in ascending order because the walk only moves forward.
//! Booked times are matched by exact string equality, so overlapping
//! durations are not detected; bookings are always stored on canonical
//! `HH:MM` times to keep that comparison meaningful.

use std::{collections::HashSet, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, info};

use crate::{
    errors::{ClinicError, ClinicResult},
    models::availability::{AvailabilityResponse, Slot, WorkingWindow},
    store::{AppointmentStore, DoctorStore},
};

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern is a valid regex")
});

pub fn is_valid_time(time: &str) -> bool {
    TIME_PATTERN.is_match(time)
}

/// Parses `H:MM` or `HH:MM` into minutes since midnight.
pub fn time_to_minutes(time: &str) -> ClinicResult<u32> {
    let captures = TIME_PATTERN
        .captures(time)
        .ok_or_else(|| ClinicError::InvalidTimeFormat(time.to_string()))?;

    // Both groups are digit-only after the match.
    let hours: u32 = captures[1]
        .parse()
        .map_err(|_| ClinicError::InvalidTimeFormat(time.to_string()))?;
    let minutes: u32 = captures[2]
        .parse()
        .map_err(|_| ClinicError::InvalidTimeFormat(time.to_string()))?;

    Ok(hours * 60 + minutes)
}

pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Renders minutes since midnight as `h:mm AM|PM`.
pub fn format_time_display(minutes: u32) -> String {
    let hours = minutes / 60;
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hours, minutes % 60, period)
}

/// Normalises a valid time to `HH:MM`, e.g. `9:00` becomes `09:00`.
pub fn canonical_time(time: &str) -> ClinicResult<String> {
    time_to_minutes(time.trim()).map(minutes_to_time)
}

/// Checks that a schedule can be fed to [`compute_available_slots`].
pub fn validate_working_hours(start: &str, end: &str, slot_duration_minutes: i32) -> ClinicResult<()> {
    time_to_minutes(start)?;
    time_to_minutes(end)?;
    slot_step(slot_duration_minutes)?;
    Ok(())
}

fn slot_step(slot_duration_minutes: i32) -> ClinicResult<u32> {
    u32::try_from(slot_duration_minutes)
        .ok()
        .filter(|step| *step > 0)
        .ok_or_else(|| {
            ClinicError::InvalidConfiguration(format!(
                "Consultation duration must be a positive number of minutes, got {}",
                slot_duration_minutes
            ))
        })
}

pub fn compute_available_slots(
    window: &WorkingWindow,
    booked: &HashSet<String>,
) -> ClinicResult<Vec<Slot>> {
    let start = time_to_minutes(&window.start)?;
    let end = time_to_minutes(&window.end)?;
    let step = slot_step(window.slot_duration_minutes)?;

    debug!(
        "Generating slots: {} - {}, duration: {}min",
        window.start, window.end, step
    );

    if start >= end {
        debug!("Working window is empty: start >= end");
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    let mut current = start;
    while current + step <= end {
        let time = minutes_to_time(current);
        if !booked.contains(&time) {
            slots.push(Slot {
                time,
                display: format_time_display(current),
            });
        }
        current += step;
    }

    Ok(slots)
}

/// Loads an active doctor and their bookings for `date`, then computes the
/// slots still open.
pub async fn doctor_availability<S>(
    store: &S,
    doctor_id: i64,
    date: NaiveDate,
) -> ClinicResult<AvailabilityResponse>
where
    S: DoctorStore + AppointmentStore + ?Sized,
{
    info!("Availability requested for doctor {} on {}", doctor_id, date);

    let doctor = store
        .get_doctor(doctor_id)
        .await?
        .filter(|doctor| doctor.is_active)
        .ok_or_else(|| ClinicError::NotFound(format!("Doctor {} not found", doctor_id)))?;

    let booked_slots = store.booked_times(doctor_id, date).await?;
    debug!("Booked times for doctor {}: {:?}", doctor_id, booked_slots);

    let booked: HashSet<String> = booked_slots.iter().cloned().collect();
    let available_slots = compute_available_slots(&doctor.working_window(), &booked)?;

    info!(
        "Doctor {} has {} open slots on {}",
        doctor_id,
        available_slots.len(),
        date
    );

    Ok(AvailabilityResponse {
        doctor: doctor.summary(),
        available_slots,
        booked_slots,
    })
}
