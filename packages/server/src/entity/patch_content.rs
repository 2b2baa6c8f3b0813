use common::ContentBlockType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single content block of a patch page.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "patch_content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub block_type: ContentBlockType,
    pub text: String,
    /// Relative media paths stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub images: serde_json::Value,
    /// Display position within the patch page ("order" on the wire).
    pub position: i32,

    pub patch_id: Uuid,
    #[sea_orm(belongs_to, from = "patch_id", to = "id")]
    pub patch: HasOne<super::patch::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
