use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid status: {0}. Allowed statuses are: pending, confirmed, cancelled, completed, no_show")]
    InvalidStatus(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Appointment {0} not found")]
    AppointmentNotFound(i64),

    #[error("The {time} slot on {date} is already booked. Please choose another time")]
    SlotAlreadyBooked { date: String, time: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ClinicError {
    /// True for storage or infrastructure failures whose details stay server side.
    pub fn is_internal(&self) -> bool {
        matches!(self, ClinicError::Database(_) | ClinicError::Internal(_))
    }
}

pub type ClinicResult<T> = Result<T, ClinicError>;
