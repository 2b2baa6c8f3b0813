use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One-to-one with `user`, created automatically at registration.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub bio: String,
    /// Relative media path, e.g. "avatars/default.svg".
    pub avatar: String,

    pub joined: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
