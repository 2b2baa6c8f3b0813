use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::landing_page_stat;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::stat::{CreateStatRequest, StatResponse, validate_create_stat};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Stats",
    operation_id = "listStats",
    summary = "List landing page statistics",
    description = "Returns all landing page statistics ordered by description.",
    responses(
        (status = 200, description = "Statistics", body = Vec<StatResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_stats(State(state): State<AppState>) -> Result<Json<Vec<StatResponse>>, AppError> {
    let stats = landing_page_stat::Entity::find()
        .order_by_asc(landing_page_stat::Column::Description)
        .all(&state.db)
        .await?;

    Ok(Json(stats.into_iter().map(StatResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Stats",
    operation_id = "createStat",
    summary = "Create a landing page statistic",
    request_body = CreateStatRequest,
    responses(
        (status = 201, description = "Statistic created", body = StatResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn create_stat(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStatRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_stat(&payload)?;

    let model = landing_page_stat::ActiveModel {
        value: Set(payload.value),
        description: Set(payload.description.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(StatResponse::from(model))))
}
