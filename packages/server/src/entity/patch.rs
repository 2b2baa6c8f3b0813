use common::PatchState;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "patch")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub version: String,
    pub description: String,
    /// Relative media path; NULL when the patch has no thumbnail.
    pub thumbnail: Option<String>,
    pub state: PatchState,

    /// Denormalized count, kept equal to the number of `patch_upvote` rows.
    pub upvotes: i32,

    #[sea_orm(has_many)]
    pub content: HasMany<super::patch_content::Entity>,

    #[sea_orm(has_many, via = "patch_upvote", relation_enum = "Upvoter")]
    pub upvoters: HasMany<super::user::Entity>,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

// The generated `Column` enum has no derive hook for `PartialEq`, which the
// ordering tests compare with; discriminant equality matches what the derive
// would produce for a fieldless enum.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

// The macro skips `Related` generation when an entity appears in two
// relations (`user` belongs_to and `upvoters` via junction); spell out the
// belongs_to one, which `find_also_related(user::Entity)` relies on.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
