//! # Error Handling Middleware
//!
//! Maps `ClinicError` to HTTP status codes and the `{ "success": false,
//! "error": ... }` body shared by every failing endpoint. Storage and internal
//! failures are logged in full and answered with an opaque message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_core::errors::ClinicError;
use serde_json::json;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinic_api::middleware::error_handling::AppError;
/// use clinic_core::errors::ClinicError;
///
/// async fn handler(id: i64) -> Result<Json<i64>, AppError> {
///     if id < 0 {
///         return Err(ClinicError::NotFound(format!("Doctor {} not found", id)).into());
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClinicError::InvalidTimeFormat(_)
            | ClinicError::InvalidConfiguration(_)
            | ClinicError::Validation(_)
            | ClinicError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            ClinicError::NotFound(_) | ClinicError::AppointmentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ClinicError::SlotAlreadyBooked { .. } | ClinicError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            ClinicError::Database(_) | ClinicError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the client.
    pub fn public_message(&self) -> String {
        match &self.0 {
            ClinicError::Validation(message)
            | ClinicError::NotFound(message)
            | ClinicError::Conflict(message) => message.clone(),
            e if e.is_internal() => INTERNAL_ERROR_MESSAGE.to_string(),
            e => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_internal() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "success": false, "error": self.public_message() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `ClinicResult` inside handlers.
impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Database(err))
    }
}

/// Fallback for unknown routes.
pub async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Route not found" })),
    )
        .into_response()
}
