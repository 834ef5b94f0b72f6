use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use clinic_core::{
    errors::ClinicError,
    models::{
        doctor::{CreateDoctorRequest, Doctor, DoctorFilter, NewDoctor, UpdateDoctorRequest},
        response::ApiResponse,
        specialty::CreatedResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Default, Deserialize)]
pub struct DoctorQuery {
    pub specialty_id: Option<i64>,
}

/// Active doctors, optionally restricted to one specialty.
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DoctorQuery>,
) -> Result<Json<ApiResponse<Vec<Doctor>>>, AppError> {
    let doctors = state
        .store
        .list_doctors(DoctorFilter {
            specialty_id: query.specialty_id,
            include_inactive: false,
        })
        .await?;
    Ok(Json(ApiResponse::ok(doctors)))
}

/// Every doctor, inactive ones included.
pub async fn list_all_doctors(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<Vec<Doctor>>>, AppError> {
    let doctors = state
        .store
        .list_doctors(DoctorFilter {
            specialty_id: None,
            include_inactive: true,
        })
        .await?;
    Ok(Json(ApiResponse::ok(doctors)))
}

pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    let doctor = NewDoctor::try_from(request)?;
    let created = state.store.create_doctor(&doctor).await?;
    info!("Created doctor {} ({})", created.id, created.name);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Doctor created successfully",
            CreatedResponse { id: created.id },
        )),
    ))
}

/// Merges the request over the stored doctor and saves the result.
pub async fn update_doctor(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<ApiResponse<Doctor>>, AppError> {
    let not_found = || ClinicError::NotFound(format!("Doctor {} not found", doctor_id));

    let current = state.store.get_doctor(doctor_id).await?.ok_or_else(not_found)?;
    let merged = request.apply_to(current)?;
    let updated = state
        .store
        .update_doctor(&merged)
        .await?
        .ok_or_else(not_found)?;
    info!("Updated doctor {}", doctor_id);

    Ok(Json(ApiResponse::with_message(
        "Doctor updated successfully",
        updated,
    )))
}
