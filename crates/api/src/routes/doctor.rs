use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/doctors", get(handlers::doctor::list_doctors))
        .route(
            "/api/doctors/:id/availability",
            get(handlers::availability::get_availability),
        )
        .route(
            "/api/doctors/:id/appointments",
            get(handlers::appointment::doctor_appointments),
        )
}
