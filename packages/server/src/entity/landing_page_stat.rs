use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A headline number shown on the landing page, e.g. "120 patches hosted".
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "landing_page_stat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub value: i64,
    pub description: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
