use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    /// Argon2 hash, never the plaintext.
    pub password: String,

    #[sea_orm(has_one)]
    pub profile: HasOne<super::profile::Entity>,

    #[sea_orm(has_many)]
    pub patches: HasMany<super::patch::Entity>,

    #[sea_orm(has_many, via = "patch_upvote", relation_enum = "UpvotedPatch")]
    pub upvoted_patches: HasMany<super::patch::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
