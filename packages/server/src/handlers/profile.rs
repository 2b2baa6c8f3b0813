use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{profile, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::profile::{ProfileResponse, UpdateProfileRequest, validate_update_profile};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/me",
    tag = "Profiles",
    operation_id = "getOwnProfile",
    summary = "Get the caller's profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_own_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let model = find_profile(&state.db, auth_user.user_id).await?;
    Ok(Json(ProfileResponse::from_model(model, auth_user.username)))
}

#[utoipa::path(
    patch,
    path = "/me",
    tag = "Profiles",
    operation_id = "updateOwnProfile",
    summary = "Update the caller's profile",
    description = "Partially updates bio and avatar. The join date is immutable.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_own_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_update_profile(&payload)?;

    let existing = find_profile(&state.db, auth_user.user_id).await?;
    let mut active: profile::ActiveModel = existing.into();

    if let Some(bio) = payload.bio {
        active.bio = Set(bio);
    }
    if let Some(avatar) = payload.avatar {
        active.avatar = Set(avatar.trim().to_string());
    }

    let model = active.update(&state.db).await?;
    Ok(Json(ProfileResponse::from_model(model, auth_user.username)))
}

#[utoipa::path(
    get,
    path = "/{user_id}",
    tag = "Profiles",
    operation_id = "getProfile",
    summary = "Get a user's profile",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "Profile not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(user_id))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<ProfileResponse>, AppError> {
    let model = find_profile(&state.db, user_id).await?;
    let username = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();
    Ok(Json(ProfileResponse::from_model(model, username)))
}

async fn find_profile<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<profile::Model, AppError> {
    profile::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))
}
