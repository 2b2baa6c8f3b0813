use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger of who upvoted what. The composite key makes a second upvote
/// from the same user a constraint violation rather than a double count.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "patch_upvote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub patch_id: Uuid,
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "patch_id", to = "id")]
    pub patch: Option<super::patch::Entity>,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: Option<super::user::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
