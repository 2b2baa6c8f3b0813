use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Avatar assigned to freshly registered users.
pub const DEFAULT_AVATAR: &str = "avatars/default.svg";

/// Bio assigned when a user registers without writing one.
pub fn default_bio(username: &str) -> String {
    format!("We don't know much about them, but we're sure {username} is great.")
}

/// A user profile as returned to clients.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub user_id: i32,
    pub username: String,
    pub bio: String,
    pub avatar: String,
    pub joined: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn from_model(m: crate::entity::profile::Model, username: String) -> Self {
        Self {
            user_id: m.user_id,
            username,
            bio: m.bio,
            avatar: m.avatar,
            joined: m.joined,
        }
    }
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    /// Bio text (at most 250 characters).
    pub bio: Option<String>,
    /// Media URL of the avatar.
    pub avatar: Option<String>,
}

pub fn validate_update_profile(req: &UpdateProfileRequest) -> Result<(), AppError> {
    if let Some(ref bio) = req.bio
        && bio.chars().count() > 250
    {
        return Err(AppError::Validation(
            "Bio must be at most 250 characters".into(),
        ));
    }
    if let Some(ref avatar) = req.avatar
        && avatar.trim().is_empty()
    {
        return Err(AppError::Validation("Avatar must not be empty".into()));
    }
    Ok(())
}
