use chrono::{DateTime, Utc};
use common::{ContentBlockType, validate_images};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Position assigned to a block whose payload carries no `order`.
pub const DEFAULT_BLOCK_ORDER: i32 = 1;

/// One entry of the `content` payload of a patch create/update request.
///
/// The payload itself arrives as a JSON-encoded string; see
/// [`parse_content_payload`].
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BlockPayload {
    /// Block ID. Required on update (identifies the block to overwrite),
    /// ignored on create.
    pub id: Option<String>,
    /// Block type. Defaults to `textField` when absent.
    #[serde(rename = "type", default)]
    pub block_type: ContentBlockType,
    /// Text content (at most 500 characters).
    #[serde(default)]
    pub text: String,
    /// Media URLs attached to the block.
    #[serde(default)]
    pub images: Vec<String>,
    /// Display position. Defaults to 1 when absent.
    pub order: Option<i32>,
}

/// Parse the JSON-encoded `content` string of a create/update request.
///
/// The two shape errors keep distinct messages so clients can tell a
/// syntax problem from a structural one.
pub fn parse_content_payload(raw: &str) -> Result<Vec<BlockPayload>, AppError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|_| AppError::Validation("content must be valid JSON".into()))?;
    if !value.is_array() {
        return Err(AppError::Validation("content must be a JSON array".into()));
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("content has an invalid block: {e}")))
}

/// Validate a single block payload: field bounds plus the type/image rules.
pub fn validate_block(block: &BlockPayload) -> Result<(), AppError> {
    if block.text.chars().count() > 500 {
        return Err(AppError::Validation(
            "Block text must be at most 500 characters".into(),
        ));
    }
    validate_images(block.block_type, &block.images)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(())
}

/// A content block as returned to clients.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentResponse {
    pub id: Uuid,
    /// Block type wire name (`textField`, `singleImage`, `imageGallery`).
    #[serde(rename = "type")]
    pub block_type: ContentBlockType,
    pub text: String,
    pub images: Vec<String>,
    pub order: i32,
    pub patch_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::patch_content::Model> for ContentResponse {
    fn from(m: crate::entity::patch_content::Model) -> Self {
        // Images are stored as a JSON array of strings; anything else in the
        // column is treated as empty rather than failing the response.
        let images = serde_json::from_value(m.images).unwrap_or_default();
        Self {
            id: m.id,
            block_type: m.block_type,
            text: m.text,
            images,
            order: m.position,
            patch_id: m.patch_id,
            created_at: m.created_at,
        }
    }
}
