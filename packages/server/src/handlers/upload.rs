use axum::Json;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::ContentHash;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::upload::UploadResponse;
use crate::state::AppState;
use crate::utils::filename::{file_extension, validate_flat_filename};

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024) // 64 MB
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Uploads",
    operation_id = "uploadMedia",
    summary = "Upload a media file",
    description = "Uploads a file for use as a thumbnail, avatar, or content block image. \
        The `file` multipart field is required and must carry a filename. Identical bytes \
        are stored once; the returned URL is derived from the content hash.",
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 413, description = "File too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, multipart))]
pub async fn upload_media(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut stored: Option<(ContentHash, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue; // Ignore unknown fields.
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?
            .to_string();
        let filename = validate_flat_filename(&filename)
            .map_err(|e| AppError::Validation(e.message().into()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("File must not be empty".into()));
        }

        let hash = state.blob_store.put(&bytes).await?;
        stored = Some((hash, file_extension(&filename)));
    }

    let (hash, extension) =
        stored.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let name = match extension {
        Some(ext) => format!("{}.{}", hash.to_hex(), ext),
        None => hash.to_hex(),
    };
    let url = format!("{}/media/{}", state.config.storage.public_base, name);

    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}

/// Serve a stored media file by its hash-derived name.
#[instrument(skip(state), fields(name))]
pub async fn serve_media(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let name = validate_flat_filename(&name)
        .map_err(|_| AppError::NotFound("File not found".into()))?;

    let stem = name.split('.').next().unwrap_or(name);
    let hash = ContentHash::from_hex(stem)
        .map_err(|_| AppError::NotFound("File not found".into()))?;

    let bytes = state
        .blob_store
        .get(&hash)
        .await
        .map_err(|_| AppError::NotFound("File not found".into()))?;

    let content_type = mime_guess::from_path(name)
        .first_or_octet_stream()
        .to_string();

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Response build error: {e}")))?)
}
