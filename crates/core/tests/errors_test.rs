use std::error::Error;

use clinic_core::errors::{ClinicError, ClinicResult};

#[test]
fn test_clinic_error_display() {
    let invalid_time = ClinicError::InvalidTimeFormat("25:00".to_string());
    let invalid_config = ClinicError::InvalidConfiguration("duration 0".to_string());
    let validation = ClinicError::Validation("Invalid input".to_string());
    let not_found = ClinicError::NotFound("Doctor 3 not found".to_string());
    let missing_appointment = ClinicError::AppointmentNotFound(99999);
    let slot_taken = ClinicError::SlotAlreadyBooked {
        date: "2024-06-01".to_string(),
        time: "09:00".to_string(),
    };

    assert_eq!(invalid_time.to_string(), "Invalid time format: 25:00");
    assert_eq!(
        invalid_config.to_string(),
        "Invalid configuration: duration 0"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(not_found.to_string(), "Resource not found: Doctor 3 not found");
    assert_eq!(missing_appointment.to_string(), "Appointment 99999 not found");
    assert_eq!(
        slot_taken.to_string(),
        "The 09:00 slot on 2024-06-01 is already booked. Please choose another time"
    );
    assert!(
        ClinicError::InvalidStatus("bogus".to_string())
            .to_string()
            .starts_with("Invalid status: bogus")
    );
}

#[test]
fn test_internal_errors_are_flagged() {
    let database = ClinicError::Database(eyre::eyre!("Database connection failed"));
    let internal = ClinicError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert!(database.is_internal());
    assert!(internal.is_internal());
    assert!(!ClinicError::Conflict("duplicate".to_string()).is_internal());
    assert!(!ClinicError::AppointmentNotFound(1).is_internal());
}

#[test]
fn test_error_source_is_preserved() {
    let io_error = std::io::Error::other("IO error");
    let clinic_error = ClinicError::Internal(Box::new(io_error));

    assert!(clinic_error.source().is_some());
    assert!(clinic_error.to_string().contains("IO error"));
}

#[test]
fn test_eyre_report_converts_into_database_error() {
    fn failing() -> ClinicResult<()> {
        Err(eyre::eyre!("pool timed out"))?;
        Ok(())
    }

    match failing() {
        Err(ClinicError::Database(report)) => assert!(report.to_string().contains("pool timed out")),
        other => panic!("Expected Database error, got: {:?}", other),
    }
}
