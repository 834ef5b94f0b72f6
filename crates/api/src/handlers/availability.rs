//! # Availability Handlers
//!
//! Exposes the availability engine for a single doctor and day. Slot
//! generation itself lives in `clinic_core::availability`; this handler only
//! validates the query and shapes the response.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use clinic_core::{
    availability::doctor_availability,
    errors::ClinicError,
    models::{
        appointment::parse_date,
        availability::{AvailabilityQuery, AvailabilityResponse},
        response::ApiResponse,
    },
};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

/// Open slots for a doctor on a date
///
/// # Endpoint
///
/// ```text
/// GET /api/doctors/:id/availability?date=2024-06-01
/// ```
///
/// # Errors
///
/// * `ClinicError::Validation` - The date is missing or not `YYYY-MM-DD`
/// * `ClinicError::NotFound` - The doctor does not exist or is inactive
/// * `ClinicError::InvalidConfiguration` - The doctor's schedule cannot produce slots
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, AppError> {
    let date = query
        .date
        .filter(|date| !date.trim().is_empty())
        .ok_or_else(|| ClinicError::Validation("Date is required".to_string()))?;
    let date = parse_date(&date)?;

    let availability = doctor_availability(state.store.as_ref(), doctor_id, date).await?;
    Ok(Json(ApiResponse::ok(availability)))
}
