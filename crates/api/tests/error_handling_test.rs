mod test_utils;

use std::sync::Arc;

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use clinic_api::middleware::error_handling::{AppError, INTERNAL_ERROR_MESSAGE};
use clinic_core::{errors::ClinicError, models::doctor::Doctor};
use clinic_db::mock::MockClinicStore;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::server_with_store;

fn sample_doctor(id: i64) -> Doctor {
    Doctor {
        id,
        name: "Dr. Carlos Rodriguez".to_string(),
        specialty_id: Some(1),
        email: "carlos.rodriguez@clinic.example".to_string(),
        phone: None,
        photo_url: "/assets/images/doctor-default.jpg".to_string(),
        experience_years: 15,
        consultation_duration: 30,
        working_hours_start: "08:00".to_string(),
        working_hours_end: "17:00".to_string(),
        available_days: "1,2,3,4,5".to_string(),
        fee: 60.0,
        bio: None,
        is_active: true,
        created_at: Utc::now(),
        specialty_name: None,
        specialty_icon: None,
    }
}

#[rstest]
#[case(ClinicError::InvalidTimeFormat("9am".to_string()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::InvalidConfiguration("duration".to_string()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::Validation("missing".to_string()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::InvalidStatus("bogus".to_string()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::NotFound("Doctor 1 not found".to_string()), StatusCode::NOT_FOUND)]
#[case(ClinicError::AppointmentNotFound(7), StatusCode::NOT_FOUND)]
#[case(
    ClinicError::SlotAlreadyBooked { date: "2024-06-01".to_string(), time: "09:00".to_string() },
    StatusCode::CONFLICT
)]
#[case(ClinicError::Conflict("duplicate".to_string()), StatusCode::CONFLICT)]
#[case(ClinicError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_shape() {
    let response = AppError(ClinicError::AppointmentNotFound(12)).into_response();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        json!({ "success": false, "error": "Appointment 12 not found" })
    );
}

#[test]
fn test_internal_errors_are_opaque() {
    let database = AppError(ClinicError::Database(eyre::eyre!("password authentication failed")));
    let internal = AppError(ClinicError::Internal(Box::new(std::io::Error::other(
        "disk full",
    ))));

    assert_eq!(database.public_message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(internal.public_message(), INTERNAL_ERROR_MESSAGE);
}

#[test]
fn test_validation_message_is_passed_through() {
    let error = AppError(ClinicError::Validation("Date is required".to_string()));

    assert_eq!(error.public_message(), "Date is required");
}

#[test_log::test(tokio::test)]
async fn test_store_failure_becomes_500() {
    let mut store = MockClinicStore::new();
    store
        .expect_list_specialties()
        .returning(|| Err(ClinicError::Database(eyre::eyre!("relation does not exist"))));
    let server = server_with_store(Arc::new(store));

    let response = server.get("/api/specialties").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": INTERNAL_ERROR_MESSAGE })
    );
}

#[tokio::test]
async fn test_lost_race_at_insert_is_409() {
    let mut store = MockClinicStore::new();
    store
        .expect_get_doctor()
        .returning(|id| Ok(Some(sample_doctor(id))));
    store.expect_find_active_appointment().returning(|_, _, _| Ok(None));
    store.expect_insert_appointment().returning(|new| {
        Err(ClinicError::SlotAlreadyBooked {
            date: new.appointment_date.to_string(),
            time: new.appointment_time.clone(),
        })
    });
    let server = server_with_store(Arc::new(store));

    let response = server
        .post("/api/appointments")
        .json(&test_utils::booking_request(1, "2024-06-01", "09:00"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}
