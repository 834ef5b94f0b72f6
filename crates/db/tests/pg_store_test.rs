//! Run against a disposable database:
//! `TEST_DATABASE_URL=postgres://... cargo test -p clinic-db -- --ignored`

use chrono::NaiveDate;
use clinic_core::{
    booking::{attempt_book, set_status},
    errors::ClinicError,
    models::{
        appointment::{AppointmentStatus, CreateAppointmentRequest},
        doctor::{CreateDoctorRequest, NewDoctor},
        specialty::NewSpecialty,
    },
    store::{AppointmentStore, DoctorStore, SpecialtyStore},
};
use clinic_db::{mock::create_test_pool, store::PgClinicStore};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use pretty_assertions::assert_eq;

async fn store_with_doctor() -> (PgClinicStore, i64) {
    let pool = create_test_pool().await.expect("test database");
    let store = PgClinicStore::new(pool);

    let suffix: String = Name().fake();
    let specialty = store
        .create_specialty(&NewSpecialty {
            name: format!("Specialty {}", suffix),
            description: None,
            icon: "fa-stethoscope".to_string(),
        })
        .await
        .unwrap();
    let doctor = store
        .create_doctor(
            &NewDoctor::try_from(CreateDoctorRequest {
                name: Some(Name().fake()),
                specialty_id: Some(specialty.id),
                email: Some(SafeEmail().fake()),
                ..Default::default()
            })
            .unwrap(),
        )
        .await
        .unwrap();

    (store, doctor.id)
}

fn booking(doctor_id: i64, time: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        doctor_id: Some(doctor_id),
        patient_name: Some(Name().fake()),
        patient_email: Some(SafeEmail().fake()),
        patient_phone: Some("555-0100".to_string()),
        appointment_date: Some("2024-06-01".to_string()),
        appointment_time: Some(time.to_string()),
        reason: None,
        notes: None,
    }
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_unique_index_rejects_second_active_insert() {
    let (store, doctor_id) = store_with_doctor().await;
    let new = booking(doctor_id, "09:00").validate().unwrap();

    store.insert_appointment(&new).await.unwrap();
    let result = store.insert_appointment(&new).await;

    assert!(matches!(result, Err(ClinicError::SlotAlreadyBooked { .. })));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_booking_round_trip_through_postgres() {
    let (store, doctor_id) = store_with_doctor().await;

    let created = attempt_book(&store, booking(doctor_id, "10:00")).await.unwrap();
    assert_eq!(created.status, AppointmentStatus::Confirmed);
    assert!(created.doctor_name.is_some());

    let booked = store
        .booked_times(doctor_id, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .await
        .unwrap();
    assert_eq!(booked, vec!["10:00".to_string()]);

    let cancelled = set_status(&store, created.id, "cancelled").await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    attempt_book(&store, booking(doctor_id, "10:00")).await.unwrap();
    let reopen = set_status(&store, created.id, "pending").await;
    assert!(matches!(reopen, Err(ClinicError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_concurrent_inserts_only_one_wins() {
    let (store, doctor_id) = store_with_doctor().await;
    let new = booking(doctor_id, "11:00").validate().unwrap();

    let (a, b) = tokio::join!(store.insert_appointment(&new), store.insert_appointment(&new));

    assert!(a.is_ok() ^ b.is_ok());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_doctor_with_unknown_specialty_is_a_validation_error() {
    let (store, doctor_id) = store_with_doctor().await;

    let created = store
        .create_doctor(
            &NewDoctor::try_from(CreateDoctorRequest {
                name: Some(Name().fake()),
                specialty_id: Some(i64::MAX),
                email: Some(SafeEmail().fake()),
                ..Default::default()
            })
            .unwrap(),
        )
        .await;
    assert!(matches!(created, Err(ClinicError::Validation(_))));

    let mut doctor = store.get_doctor(doctor_id).await.unwrap().unwrap();
    doctor.specialty_id = Some(i64::MAX);
    let updated = store.update_doctor(&doctor).await;
    assert!(matches!(updated, Err(ClinicError::Validation(_))));
}
