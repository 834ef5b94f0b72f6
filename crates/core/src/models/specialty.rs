use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ClinicError, ClinicResult};

pub const DEFAULT_SPECIALTY_ICON: &str = "fa-stethoscope";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSpecialtyRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A validated specialty ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpecialty {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
}

impl TryFrom<CreateSpecialtyRequest> for NewSpecialty {
    type Error = ClinicError;

    fn try_from(request: CreateSpecialtyRequest) -> ClinicResult<Self> {
        let name = request
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ClinicError::Validation("Specialty name is required".to_string()))?;

        Ok(Self {
            name,
            description: request.description,
            icon: request
                .icon
                .filter(|icon| !icon.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SPECIALTY_ICON.to_string()),
        })
    }
}

/// Body returned by the admin create endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}
