use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        multipart::{Multipart, MultipartError},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{instrument, warn};

use hogwarts_core::{AppError, PaginationParams, SchoolError};
use hogwarts_models::avatars::AVATAR_FIELD;
use hogwarts_models::{PaginatedAvatarsResponse, StudentId};

use crate::docs::ErrorResponse;
use crate::modules::avatars::service::{AvatarService, AvatarUpload};
use crate::state::AppState;

fn multipart_error(e: MultipartError) -> AppError {
    AppError::new(e.status(), e)
}

/// Reads the `avatar` field, giving up as soon as it grows past `max_bytes`.
async fn read_avatar_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<AvatarUpload, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if bytes.len() + chunk.len() > max_bytes {
                warn!(max_bytes, "Rejected oversized avatar upload");
                return Err(SchoolError::FileTooBig.into());
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(AvatarUpload {
            bytes,
            filename,
            content_type,
        });
    }

    Err(AppError::bad_request(anyhow!(
        "Multipart field '{}' is required",
        AVATAR_FIELD
    )))
}

fn image_response(media_type: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, media_type.to_string()),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
        ],
        bytes,
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/avatars/{id}",
    params(("id" = i64, Path, description = "Student id")),
    request_body(content_type = "multipart/form-data", description = "Image in the `avatar` field, at most 300 KiB"),
    responses(
        (status = 200, description = "Avatar stored"),
        (status = 400, description = "File too big, missing, or not an image", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Avatars"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let upload = read_avatar_field(&mut multipart, state.avatar_config.max_bytes).await?;

    AvatarService::upload_avatar(
        &state.db,
        state.storage.as_ref(),
        &state.avatar_config,
        id,
        upload,
    )
    .await?;

    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/avatars/{id}/preview",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Thumbnail bytes", content_type = "image/*"),
        (status = 404, description = "Student has no avatar", body = ErrorResponse)
    ),
    tag = "Avatars"
)]
#[instrument(skip(state))]
pub async fn get_avatar_preview(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Response, AppError> {
    let avatar = AvatarService::get_avatar(&state.db, id).await?;
    Ok(image_response(&avatar.media_type, avatar.preview))
}

#[utoipa::path(
    get,
    path = "/avatars/{id}/real",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Original image bytes", content_type = "image/*"),
        (status = 404, description = "Student has no avatar", body = ErrorResponse)
    ),
    tag = "Avatars"
)]
#[instrument(skip(state))]
pub async fn get_avatar_original(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Response, AppError> {
    let (avatar, bytes) = AvatarService::get_original(&state.db, state.storage.as_ref(), id).await?;
    Ok(image_response(&avatar.media_type, bytes))
}

#[utoipa::path(
    get,
    path = "/avatars",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of avatar metadata", body = PaginatedAvatarsResponse)
    ),
    tag = "Avatars"
)]
#[instrument(skip(state))]
pub async fn list_avatars(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedAvatarsResponse>, AppError> {
    let page = AvatarService::list_avatars(&state.db, &params).await?;
    Ok(Json(page))
}
