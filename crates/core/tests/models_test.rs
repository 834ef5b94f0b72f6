use chrono::NaiveDate;
use clinic_core::{
    errors::ClinicError,
    models::{
        appointment::{AppointmentStatus, CreateAppointmentRequest, PatientLookup},
        doctor::{CreateDoctorRequest, NewDoctor, UpdateDoctorRequest},
        response::ApiResponse,
        specialty::{CreateSpecialtyRequest, NewSpecialty},
    },
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};

#[rstest]
#[case("pending", AppointmentStatus::Pending)]
#[case("confirmed", AppointmentStatus::Confirmed)]
#[case("cancelled", AppointmentStatus::Cancelled)]
#[case("completed", AppointmentStatus::Completed)]
#[case("no_show", AppointmentStatus::NoShow)]
fn test_status_parses_and_serializes(#[case] raw: &str, #[case] status: AppointmentStatus) {
    assert_eq!(raw.parse::<AppointmentStatus>().unwrap(), status);
    assert_eq!(status.to_string(), raw);
    assert_eq!(to_value(status).unwrap(), json!(raw));
}

#[rstest]
#[case("bogus")]
#[case("Confirmed")]
#[case("no-show")]
#[case("")]
fn test_unknown_status_is_rejected(#[case] raw: &str) {
    assert!(matches!(
        raw.parse::<AppointmentStatus>(),
        Err(ClinicError::InvalidStatus(_))
    ));
}

#[test]
fn test_only_confirmed_and_pending_are_active() {
    let active: Vec<AppointmentStatus> = AppointmentStatus::ALL
        .into_iter()
        .filter(AppointmentStatus::is_active)
        .collect();

    assert_eq!(
        active,
        vec![AppointmentStatus::Pending, AppointmentStatus::Confirmed]
    );
    assert_eq!(AppointmentStatus::default(), AppointmentStatus::Confirmed);
}

#[test]
fn test_booking_request_validation() {
    let request: CreateAppointmentRequest = from_str(
        r#"{
            "doctor_id": 1,
            "patient_name": "  Ana Torres ",
            "patient_email": "ana@example.com",
            "patient_phone": "555-0100",
            "appointment_date": "2024-06-01",
            "appointment_time": "9:30"
        }"#,
    )
    .unwrap();

    let appointment = request.validate().unwrap();

    assert_eq!(appointment.patient_name, "Ana Torres");
    assert_eq!(
        appointment.appointment_date,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    );
    assert_eq!(appointment.appointment_time, "09:30");
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    assert_eq!(appointment.reason, None);
}

#[rstest]
#[case::missing_doctor(r#"{"patient_name":"A","patient_email":"a@x","patient_phone":"1","appointment_date":"2024-06-01","appointment_time":"09:00"}"#)]
#[case::blank_name(r#"{"doctor_id":1,"patient_name":"","patient_email":"a@x","patient_phone":"1","appointment_date":"2024-06-01","appointment_time":"09:00"}"#)]
#[case::missing_time(r#"{"doctor_id":1,"patient_name":"A","patient_email":"a@x","patient_phone":"1","appointment_date":"2024-06-01"}"#)]
#[case::bad_date(r#"{"doctor_id":1,"patient_name":"A","patient_email":"a@x","patient_phone":"1","appointment_date":"01/06/2024","appointment_time":"09:00"}"#)]
fn test_booking_request_rejections(#[case] body: &str) {
    let request: CreateAppointmentRequest = from_str(body).unwrap();
    assert!(matches!(request.validate(), Err(ClinicError::Validation(_))));
}

#[test]
fn test_patient_lookup_modes() {
    let either_email = PatientLookup::new(Some("a@x".into()), None).unwrap();
    let both = PatientLookup::new(Some("a@x".into()), Some("555".into())).unwrap();

    assert!(either_email.matches("a@x", "000"));
    assert!(!either_email.matches("b@x", "555"));
    assert!(both.matches("a@x", "555"));
    assert!(!both.matches("a@x", "000"));
    assert!(matches!(
        PatientLookup::new(Some(" ".into()), None),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn test_new_doctor_applies_defaults() {
    let request = CreateDoctorRequest {
        name: Some("Dr. Roberto Silva".to_string()),
        specialty_id: Some(3),
        email: Some("roberto.silva@clinic.test".to_string()),
        ..Default::default()
    };

    let doctor = NewDoctor::try_from(request).unwrap();

    assert_eq!(doctor.consultation_duration, 30);
    assert_eq!(doctor.working_hours_start, "09:00");
    assert_eq!(doctor.working_hours_end, "18:00");
    assert_eq!(doctor.available_days, "1,2,3,4,5");
    assert_eq!(doctor.experience_years, 5);
    assert_eq!(doctor.fee, 50.0);
}

#[test]
fn test_new_doctor_requires_name_specialty_and_email() {
    let request = CreateDoctorRequest {
        name: Some("Dr. Nobody".to_string()),
        email: Some("nobody@clinic.test".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        NewDoctor::try_from(request),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn test_new_doctor_rejects_unusable_schedule() {
    let request = CreateDoctorRequest {
        name: Some("Dr. Night".to_string()),
        specialty_id: Some(1),
        email: Some("night@clinic.test".to_string()),
        consultation_duration: Some(0),
        ..Default::default()
    };

    assert!(matches!(
        NewDoctor::try_from(request),
        Err(ClinicError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_update_doctor_merges_over_stored_record() {
    let request = CreateDoctorRequest {
        name: Some("Dr. Carlos Rodriguez".to_string()),
        specialty_id: Some(1),
        email: Some("carlos@clinic.test".to_string()),
        ..Default::default()
    };
    let new = NewDoctor::try_from(request).unwrap();
    let stored = clinic_core::models::doctor::Doctor {
        id: 1,
        name: new.name,
        specialty_id: Some(new.specialty_id),
        email: new.email,
        phone: new.phone,
        photo_url: new.photo_url,
        experience_years: new.experience_years,
        consultation_duration: new.consultation_duration,
        working_hours_start: new.working_hours_start,
        working_hours_end: new.working_hours_end,
        available_days: new.available_days,
        fee: new.fee,
        bio: new.bio,
        is_active: true,
        created_at: chrono::Utc::now(),
        specialty_name: None,
        specialty_icon: None,
    };

    let update = UpdateDoctorRequest {
        working_hours_start: Some("08:00".to_string()),
        is_active: Some(false),
        ..Default::default()
    };
    let updated = update.apply_to(stored.clone()).unwrap();

    assert_eq!(updated.working_hours_start, "08:00");
    assert_eq!(updated.working_hours_end, stored.working_hours_end);
    assert_eq!(updated.name, stored.name);
    assert!(!updated.is_active);

    let broken = UpdateDoctorRequest {
        working_hours_end: Some("6pm".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        broken.apply_to(stored),
        Err(ClinicError::InvalidTimeFormat(_))
    ));
}

#[test]
fn test_specialty_request_defaults_icon() {
    let specialty = NewSpecialty::try_from(CreateSpecialtyRequest {
        name: Some("Neurology".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(specialty.icon, "fa-stethoscope");
    assert!(matches!(
        NewSpecialty::try_from(CreateSpecialtyRequest::default()),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn test_api_response_envelope() {
    let plain = to_value(ApiResponse::ok(vec![1, 2])).unwrap();
    let with_message = to_value(ApiResponse::with_message("Done", 3)).unwrap();

    assert_eq!(plain, json!({ "success": true, "data": [1, 2] }));
    assert_eq!(
        with_message,
        json!({ "success": true, "message": "Done", "data": 3 })
    );
}
