use chrono::{DateTime, Utc};
use common::PatchState;
use sea_orm::Order;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::patch;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::double_option;

/// Version assigned to a patch created without one.
pub const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePatchRequest {
    /// Patch title (1-50 characters).
    #[schema(example = "Moonlight Translation Patch")]
    pub title: String,
    /// Semantic-ish version string (at most 10 characters). Defaults to "1.0.0".
    #[schema(example = "1.2.0")]
    pub version: Option<String>,
    /// Short description (1-250 characters).
    pub description: String,
    /// Media URL of the thumbnail.
    pub thumbnail: Option<String>,
    /// Initial state. Defaults to `draft`.
    pub state: Option<PatchState>,
    /// JSON-encoded array of content blocks.
    #[schema(example = r#"[{"type": "textField", "text": "Install notes", "order": 1}]"#)]
    pub content: Option<String>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdatePatchRequest {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Pass `null` to clear the thumbnail.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub thumbnail: Option<Option<String>>,
    pub state: Option<PatchState>,
    /// JSON-encoded array of content block updates. Each entry must carry
    /// the `id` of an existing block of this patch.
    pub content: Option<String>,
}

/// A patch as returned to clients.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PatchResponse {
    pub id: Uuid,
    pub title: String,
    pub version: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub state: PatchState,
    pub upvotes: i32,
    /// Username of the owner.
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatchResponse {
    pub fn from_model(m: patch::Model, username: String) -> Self {
        Self {
            id: m.id,
            title: m.title,
            version: m.version,
            description: m.description,
            thumbnail: m.thumbnail,
            state: m.state,
            upvotes: m.upvotes,
            user: username,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Response to a successful upvote.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UpvoteResponse {
    /// Upvote count after this upvote was recorded.
    #[schema(example = 13)]
    pub upvotes: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PatchListResponse {
    pub data: Vec<PatchResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct PatchListQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Comma-separated ordering fields, each with an optional leading `-`
    /// for descending. Allowed: created, updated, title, upvotes, version.
    pub ordering: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct PersonalListQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// List patches of this user instead of the caller.
    pub user_id: Option<i32>,
    /// Comma-separated ordering fields, each with an optional leading `-`
    /// for descending. Allowed: created, updated, title, upvotes, version.
    pub ordering: Option<String>,
}

pub fn validate_create_patch(req: &CreatePatchRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_description(&req.description)?;
    if let Some(ref version) = req.version {
        validate_version(version)?;
    }
    Ok(())
}

pub fn validate_update_patch(req: &UpdatePatchRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref description) = req.description {
        validate_description(description)?;
    }
    if let Some(ref version) = req.version {
        validate_version(version)?;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 50 {
        return Err(AppError::Validation("Title must be 1-50 characters".into()));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    let description = description.trim();
    if description.is_empty() || description.chars().count() > 250 {
        return Err(AppError::Validation(
            "Description must be 1-250 characters".into(),
        ));
    }
    Ok(())
}

fn validate_version(version: &str) -> Result<(), AppError> {
    let version = version.trim();
    if version.is_empty() || version.chars().count() > 10 {
        return Err(AppError::Validation(
            "Version must be 1-10 characters".into(),
        ));
    }
    Ok(())
}

/// Parse a comma-separated `ordering` expression into sort columns.
///
/// Unknown fields are a validation error rather than being silently
/// ignored. An empty expression falls back to the default ordering.
pub fn parse_ordering(expr: Option<&str>) -> Result<Vec<(patch::Column, Order)>, AppError> {
    let Some(expr) = expr else {
        return Ok(default_ordering());
    };

    let mut columns = Vec::new();
    for field in expr.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let (name, order) = match field.strip_prefix('-') {
            Some(name) => (name, Order::Desc),
            None => (field, Order::Asc),
        };
        let column = match name {
            "created" => patch::Column::CreatedAt,
            "updated" => patch::Column::UpdatedAt,
            "title" => patch::Column::Title,
            "upvotes" => patch::Column::Upvotes,
            "version" => patch::Column::Version,
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown ordering field '{other}'. Allowed: created, updated, title, upvotes, version"
                )));
            }
        };
        columns.push((column, order));
    }

    if columns.is_empty() {
        return Ok(default_ordering());
    }
    Ok(columns)
}

fn default_ordering() -> Vec<(patch::Column, Order)> {
    vec![(patch::Column::CreatedAt, Order::Desc)]
}
