use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            post(handlers::appointment::book_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            patch(handlers::appointment::update_appointment_status),
        )
        .route(
            "/api/patient/appointments",
            get(handlers::appointment::patient_appointments),
        )
}
