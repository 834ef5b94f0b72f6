use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use clinic_core::models::response::ApiResponse;
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
}

async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::with_message(
        "Clinic booking API is running",
        HealthResponse {
            status: "ok",
            timestamp: Utc::now(),
        },
    ))
}

async fn version() -> Json<ApiResponse<VersionResponse>> {
    Json(ApiResponse::ok(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
