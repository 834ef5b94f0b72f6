#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use clinic_api::{ApiState, app, config::ApiConfig};
use clinic_core::{models::appointment::CreateAppointmentRequest, store::ClinicStore};
use clinic_db::memory::MemoryStore;
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};

/// Server over the seeded in-memory store.
pub fn test_server() -> TestServer {
    server_with_store(Arc::new(MemoryStore::seeded()))
}

pub fn server_with_store(store: Arc<dyn ClinicStore>) -> TestServer {
    let state = Arc::new(ApiState::new(store));
    let router = app(state, &ApiConfig::default()).expect("router");
    TestServer::new(router).expect("test server")
}

pub fn booking_request(doctor_id: i64, date: &str, time: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        doctor_id: Some(doctor_id),
        patient_name: Some(Name().fake()),
        patient_email: Some(SafeEmail().fake()),
        patient_phone: Some("555-0100".to_string()),
        appointment_date: Some(date.to_string()),
        appointment_time: Some(time.to_string()),
        reason: Some("Consultation".to_string()),
        notes: None,
    }
}
