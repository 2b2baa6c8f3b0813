use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateStatRequest {
    /// Headline number. Must be non-zero.
    #[schema(example = 120)]
    pub value: i64,
    /// What the number counts.
    #[schema(example = "patches hosted")]
    pub description: String,
}

pub fn validate_create_stat(req: &CreateStatRequest) -> Result<(), AppError> {
    if req.value == 0 {
        return Err(AppError::Validation("Value must be non-zero".into()));
    }
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StatResponse {
    pub id: i32,
    pub value: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::landing_page_stat::Model> for StatResponse {
    fn from(m: crate::entity::landing_page_stat::Model) -> Self {
        Self {
            id: m.id,
            value: m.value,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
