use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/specialties",
            get(handlers::specialty::list_specialties).post(handlers::specialty::create_specialty),
        )
        .route(
            "/api/admin/doctors",
            get(handlers::doctor::list_all_doctors).post(handlers::doctor::create_doctor),
        )
        .route("/api/admin/doctors/:id", put(handlers::doctor::update_doctor))
        .route(
            "/api/admin/appointments",
            get(handlers::appointment::admin_appointments),
        )
}
