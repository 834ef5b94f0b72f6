use axum::{Json, extract::State, http::StatusCode};
use clinic_core::models::{
    response::ApiResponse,
    specialty::{CreateSpecialtyRequest, CreatedResponse, NewSpecialty, Specialty},
};
use std::sync::Arc;
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Lists every specialty ordered by name. Serves both the public and the
/// admin listing.
pub async fn list_specialties(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<Vec<Specialty>>>, AppError> {
    let specialties = state.store.list_specialties().await?;
    Ok(Json(ApiResponse::ok(specialties)))
}

pub async fn create_specialty(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateSpecialtyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    let specialty = NewSpecialty::try_from(request)?;
    let created = state.store.create_specialty(&specialty).await?;
    info!("Created specialty {} ({})", created.id, created.name);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Specialty created successfully",
            CreatedResponse { id: created.id },
        )),
    ))
}
