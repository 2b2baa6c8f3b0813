use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{patch, patch_content};

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the public listing:
    // SELECT ... FROM patch WHERE state = 'published' ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_patch_state_created")
        .table(patch::Entity)
        .col(patch::Column::State)
        .col(patch::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_patch_state_created exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_patch_state_created: {}", e);
        }
    }

    // Composite index for ordered block listings:
    // SELECT ... FROM patch_content WHERE patch_id = ? ORDER BY position
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_patch_content_patch_position")
        .table(patch_content::Entity)
        .col(patch_content::Column::PatchId)
        .col(patch_content::Column::Position)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_patch_content_patch_position exists");
        }
        Err(e) => {
            tracing::warn!(
                "Failed to create index idx_patch_content_patch_position: {}",
                e
            );
        }
    }

    Ok(())
}
