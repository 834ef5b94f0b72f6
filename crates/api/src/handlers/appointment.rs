//! # Appointment Handlers
//!
//! Booking, status changes and the three appointment listings (patient,
//! doctor agenda, admin). The double-booking rule is enforced by
//! `clinic_core::booking::attempt_book`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use clinic_core::{
    booking::{attempt_book, set_status},
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{
            Appointment, AppointmentFilter, AppointmentStatus, BookingResponse,
            CreateAppointmentRequest, ListOrder, PatientLookup, StatusUpdateResponse,
            UpdateStatusRequest, parse_date,
        },
        response::ApiResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Optional `status` and `date` filters shared by the listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    pub status: Option<String>,
    pub date: Option<String>,
    pub doctor_id: Option<i64>,
}

impl AppointmentQuery {
    /// Builds a store filter. Empty values are ignored; an unknown status or
    /// malformed date is rejected.
    pub fn into_filter(self, order: ListOrder) -> ClinicResult<AppointmentFilter> {
        let status = self
            .status
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().parse::<AppointmentStatus>())
            .transpose()?;
        let date = self
            .date
            .filter(|d| !d.trim().is_empty())
            .map(|d| parse_date(&d))
            .transpose()?;

        Ok(AppointmentFilter {
            doctor_id: self.doctor_id,
            status,
            date,
            order,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PatientQuery {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Books an appointment
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// Answers `201` with the new id, `409` when an active appointment already
/// holds the slot.
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), AppError> {
    let appointment = attempt_book(state.store.as_ref(), request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Appointment booked successfully",
            BookingResponse {
                appointment_id: appointment.id,
                appointment,
            },
        )),
    ))
}

/// Changes an appointment's status
///
/// # Endpoint
///
/// ```text
/// PATCH /api/appointments/:id/status
/// ```
pub async fn update_appointment_status(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<StatusUpdateResponse>>, AppError> {
    let status = request
        .status
        .filter(|status| !status.trim().is_empty())
        .ok_or_else(|| ClinicError::Validation("Status is required".to_string()))?;

    let appointment = set_status(state.store.as_ref(), appointment_id, &status).await?;
    let message = format!("Appointment {}", appointment.status.outcome());

    Ok(Json(ApiResponse::with_message(
        message,
        StatusUpdateResponse { appointment },
    )))
}

/// A patient's appointments by email and/or phone, newest first.
pub async fn patient_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, AppError> {
    let lookup = PatientLookup::new(query.email, query.phone)?;
    let appointments = state.store.find_patient_appointments(&lookup).await?;
    Ok(Json(ApiResponse::ok(appointments)))
}

/// A doctor's agenda in chronological order.
pub async fn doctor_appointments(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, AppError> {
    let filter = AppointmentQuery {
        doctor_id: Some(doctor_id),
        ..query
    }
    .into_filter(ListOrder::Chronological)?;

    let appointments = state.store.list_appointments(&filter).await?;
    Ok(Json(ApiResponse::ok(appointments)))
}

/// Admin listing, newest first.
pub async fn admin_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, AppError> {
    let filter = query.into_filter(ListOrder::NewestFirst)?;
    let appointments = state.store.list_appointments(&filter).await?;
    info!("Admin listing returned {} appointments", appointments.len());
    Ok(Json(ApiResponse::ok(appointments)))
}
