use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use common::PatchState;

use crate::entity::{patch, patch_content, patch_upvote, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, MaybeAuthUser};
use crate::extractors::json::AppJson;
use crate::models::content::{
    ContentResponse, DEFAULT_BLOCK_ORDER, parse_content_payload, validate_block,
};
use crate::models::patch::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Patches",
    operation_id = "listPatches",
    summary = "List published patches",
    description = "Returns a paginated list of published patches. Drafts and hidden patches never \
        appear here regardless of the caller. `ordering` accepts a comma-separated field list, \
        each with an optional leading `-` for descending; default is newest first.",
    params(PatchListQuery),
    responses(
        (status = 200, description = "List of patches", body = PatchListResponse),
        (status = 400, description = "Unknown ordering field (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_patches(
    State(state): State<AppState>,
    Query(query): Query<PatchListQuery>,
) -> Result<Json<PatchListResponse>, AppError> {
    let ordering = parse_ordering(query.ordering.as_deref())?;

    let select =
        patch::Entity::find().filter(ColumnTrait::eq(&patch::Column::State, PatchState::Published));
    paginated_list(&state, select, ordering, query.page).await
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "Patches",
    operation_id = "listUserPatches",
    summary = "List patches of a single user",
    description = "Returns the patches owned by `user_id`, or by the authenticated caller when \
        `user_id` is absent. Unlike the public listing this includes drafts and hidden patches; \
        `ordering` works the same way as there.",
    params(PersonalListQuery),
    responses(
        (status = 200, description = "List of patches", body = PatchListResponse),
        (status = 400, description = "Unknown ordering field (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Neither user_id nor a token given (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_user_patches(
    MaybeAuthUser(auth_user): MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<PersonalListQuery>,
) -> Result<Json<PatchListResponse>, AppError> {
    let user_id = match (query.user_id, auth_user) {
        (Some(id), _) => id,
        (None, Some(user)) => user.user_id,
        (None, None) => return Err(AppError::PermissionDenied),
    };
    let ordering = parse_ordering(query.ordering.as_deref())?;

    let select = patch::Entity::find().filter(ColumnTrait::eq(&patch::Column::UserId, user_id));
    paginated_list(&state, select, ordering, query.page).await
}

#[utoipa::path(
    post,
    path = "/new",
    tag = "Patches",
    operation_id = "createPatch",
    summary = "Create a new patch",
    description = "Creates a patch owned by the caller. `content` is a JSON-encoded array of \
        content blocks; every block is validated before anything is written, so an invalid \
        block leaves no patch behind.",
    request_body = CreatePatchRequest,
    responses(
        (status = 201, description = "Patch created", body = PatchResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_patch(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_patch(&payload)?;

    // Parse and validate every block up front; nothing is persisted until
    // the whole payload is known-good.
    let blocks = match payload.content {
        Some(ref raw) => {
            let blocks = parse_content_payload(raw)?;
            for block in &blocks {
                validate_block(block)?;
            }
            blocks
        }
        None => Vec::new(),
    };

    let now = chrono::Utc::now();
    let patch_id = Uuid::new_v4();

    let txn = state.db.begin().await?;

    let new_patch = patch::ActiveModel {
        id: Set(patch_id),
        title: Set(payload.title.trim().to_string()),
        version: Set(payload
            .version
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_VERSION)
            .to_string()),
        description: Set(payload.description.trim().to_string()),
        thumbnail: Set(payload.thumbnail),
        state: Set(payload.state.unwrap_or_default()),
        upvotes: Set(0),
        user_id: Set(auth_user.user_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let model = new_patch.insert(&txn).await?;

    for block in blocks {
        patch_content::ActiveModel {
            id: Set(Uuid::new_v4()),
            block_type: Set(block.block_type),
            text: Set(block.text),
            images: Set(serde_json::Value::from(block.images)),
            position: Set(block.order.unwrap_or(DEFAULT_BLOCK_ORDER)),
            patch_id: Set(patch_id),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(PatchResponse::from_model(model, auth_user.username)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Patches",
    operation_id = "getPatch",
    summary = "Get a patch by ID",
    description = "Returns a single patch in any state.",
    params(("id" = Uuid, Path, description = "Patch ID")),
    responses(
        (status = 200, description = "Patch details", body = PatchResponse),
        (status = 404, description = "Patch not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatchResponse>, AppError> {
    let id = parse_patch_id(&id)?;
    let (model, owner) = find_patch_with_owner(&state.db, id).await?;
    Ok(Json(PatchResponse::from_model(model, owner)))
}

#[utoipa::path(
    patch,
    path = "/{id}/update",
    tag = "Patches",
    operation_id = "updatePatch",
    summary = "Update a patch",
    description = "Partially updates a patch using PATCH semantics; only the owner may update. \
        Owner and ID are immutable. An optional `content` payload overwrites existing blocks, \
        each entry identified by its `id`; a bad entry rolls the whole update back.",
    params(("id" = Uuid, Path, description = "Patch ID")),
    request_body = UpdatePatchRequest,
    responses(
        (status = 200, description = "Patch updated", body = PatchResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Patch not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_patch(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdatePatchRequest>,
) -> Result<Json<PatchResponse>, AppError> {
    let id = parse_patch_id(&id)?;
    validate_update_patch(&payload)?;

    let blocks = match payload.content {
        Some(ref raw) => {
            let blocks = parse_content_payload(raw)?;
            for block in &blocks {
                validate_block(block)?;
            }
            blocks
        }
        None => Vec::new(),
    };

    let txn = state.db.begin().await?;

    let existing = find_patch(&txn, id).await?;
    if existing.user_id != auth_user.user_id {
        return Err(AppError::PermissionDenied);
    }

    // Block updates first: a bogus block ID must leave the patch row
    // untouched, and the rollback guarantees it.
    for block in blocks {
        let block_id = block
            .id
            .as_deref()
            .ok_or_else(|| AppError::Validation("content block update requires an id".into()))?;
        let block_id = Uuid::parse_str(block_id).map_err(|_| {
            AppError::Validation("content block not found for this patch".into())
        })?;

        let existing_block = patch_content::Entity::find_by_id(block_id)
            .filter(patch_content::Column::PatchId.eq(id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::Validation("content block not found for this patch".into())
            })?;

        // An update entry fully describes the block; omitted fields take
        // the same defaults as creation.
        let mut active: patch_content::ActiveModel = existing_block.into();
        active.block_type = Set(block.block_type);
        active.text = Set(block.text);
        active.images = Set(serde_json::Value::from(block.images));
        active.position = Set(block.order.unwrap_or(DEFAULT_BLOCK_ORDER));
        active.update(&txn).await?;
    }

    let mut active: patch::ActiveModel = existing.into();
    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(ref version) = payload.version {
        active.version = Set(version.trim().to_string());
    }
    if let Some(ref description) = payload.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(thumbnail) = payload.thumbnail {
        active.thumbnail = Set(thumbnail);
    }
    if let Some(patch_state) = payload.state {
        active.state = Set(patch_state);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(PatchResponse::from_model(model, auth_user.username)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Patches",
    operation_id = "deletePatch",
    summary = "Delete a patch",
    description = "Permanently deletes a patch together with its content blocks and upvote \
        ledger. Only the owner may delete.",
    params(("id" = Uuid, Path, description = "Patch ID")),
    responses(
        (status = 204, description = "Patch deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Patch not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_patch(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_patch_id(&id)?;

    let txn = state.db.begin().await?;

    let existing = find_patch(&txn, id).await?;
    if existing.user_id != auth_user.user_id {
        return Err(AppError::PermissionDenied);
    }

    patch_content::Entity::delete_many()
        .filter(patch_content::Column::PatchId.eq(id))
        .exec(&txn)
        .await?;
    patch_upvote::Entity::delete_many()
        .filter(patch_upvote::Column::PatchId.eq(id))
        .exec(&txn)
        .await?;
    patch::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/content",
    tag = "Patches",
    operation_id = "listPatchContent",
    summary = "List the content blocks of a patch",
    description = "Returns the content blocks of a patch ordered by position.",
    params(("id" = Uuid, Path, description = "Patch ID")),
    responses(
        (status = 200, description = "Content blocks", body = Vec<ContentResponse>),
        (status = 404, description = "Patch not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn list_patch_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ContentResponse>>, AppError> {
    let id = parse_patch_id(&id)?;
    find_patch(&state.db, id).await?;

    let blocks = patch_content::Entity::find()
        .filter(patch_content::Column::PatchId.eq(id))
        .order_by_asc(patch_content::Column::Position)
        .all(&state.db)
        .await?;

    Ok(Json(blocks.into_iter().map(ContentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/{id}/upvote",
    tag = "Patches",
    operation_id = "upvotePatch",
    summary = "Upvote a patch",
    description = "Records an upvote by the caller. Each user counts at most once per patch; \
        a second attempt is rejected and the count is unchanged.",
    params(("id" = Uuid, Path, description = "Patch ID")),
    responses(
        (status = 200, description = "Upvote recorded", body = UpvoteResponse),
        (status = 400, description = "Already upvoted (ALREADY_UPVOTED)", body = ErrorBody),
        (status = 403, description = "Anonymous caller (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Patch not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn upvote_patch(
    MaybeAuthUser(auth_user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpvoteResponse>, AppError> {
    let user = auth_user.ok_or(AppError::PermissionDenied)?;
    let id = parse_patch_id(&id)?;

    let txn = state.db.begin().await?;

    find_patch(&txn, id).await?;

    // The composite primary key makes this insert the at-most-once gate:
    // ON CONFLICT DO NOTHING touches zero rows for a repeat upvote.
    let inserted = patch_upvote::Entity::insert(patch_upvote::ActiveModel {
        patch_id: Set(id),
        user_id: Set(user.user_id),
        created_at: Set(chrono::Utc::now()),
    })
    .on_conflict(
        OnConflict::columns([
            patch_upvote::Column::PatchId,
            patch_upvote::Column::UserId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    if inserted == 0 {
        return Err(AppError::AlreadyUpvoted);
    }

    // Count moves only when the ledger row was actually inserted.
    patch::Entity::update_many()
        .col_expr(
            patch::Column::Upvotes,
            Expr::col(patch::Column::Upvotes).add(1),
        )
        .filter(patch::Column::Id.eq(id))
        .exec(&txn)
        .await?;

    let updated = find_patch(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(UpvoteResponse {
        upvotes: updated.upvotes,
    }))
}

/// Parse a path segment as a patch ID. Anything that is not UUID-shaped
/// behaves like a patch that does not exist.
fn parse_patch_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Patch not found".into()))
}

async fn find_patch<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<patch::Model, AppError> {
    patch::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Patch not found".into()))
}

async fn find_patch_with_owner<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<(patch::Model, String), AppError> {
    let (model, owner) = patch::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Patch not found".into()))?;
    let username = owner.map(|u| u.username).unwrap_or_default();
    Ok((model, username))
}

async fn paginated_list(
    state: &AppState,
    select: Select<patch::Entity>,
    ordering: Vec<(patch::Column, Order)>,
    page: Option<u64>,
) -> Result<Json<PatchListResponse>, AppError> {
    let page = Ord::max(page.unwrap_or(1), 1);
    let per_page = Ord::max(state.config.pagination.page_size, 1);

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let mut select = select;
    for (column, order) in ordering {
        select = select.order_by(column, order);
    }

    let rows = select
        .find_also_related(user::Entity)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let data = rows
        .into_iter()
        .map(|(model, owner)| {
            let username = owner.map(|u| u.username).unwrap_or_default();
            PatchResponse::from_model(model, username)
        })
        .collect();

    Ok(Json(PatchListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}
