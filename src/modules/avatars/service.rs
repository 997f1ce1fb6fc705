use anyhow::Context;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use hogwarts_config::AvatarConfig;
use hogwarts_core::{
    AppError, FileStorage, PaginationMeta, PaginationParams, SchoolError, StorageError,
};
use hogwarts_models::avatars::{avatar_extension, avatar_key, storage_key_of};
use hogwarts_models::{Avatar, PaginatedAvatarsResponse, StudentId};

use crate::metrics;
use crate::modules::avatars::preview::generate_preview;

/// Image received from the `avatar` multipart field.
#[derive(Debug)]
pub struct AvatarUpload {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

pub struct AvatarService;

impl AvatarService {
    /// Stores a student's avatar and its preview, replacing any previous one.
    #[instrument(skip(db, storage, config, upload), fields(upload.size = upload.bytes.len(), db.operation = "UPSERT", db.table = "avatars"))]
    pub async fn upload_avatar(
        db: &PgPool,
        storage: &dyn FileStorage,
        config: &AvatarConfig,
        student_id: StudentId,
        upload: AvatarUpload,
    ) -> Result<Avatar, AppError> {
        if upload.bytes.len() > config.max_bytes {
            return Err(SchoolError::FileTooBig.into());
        }

        let student_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(student_id)
                .fetch_one(db)
                .await?;
        if !student_exists {
            return Err(SchoolError::StudentNotFound.into());
        }

        let extension = avatar_extension(upload.filename.as_deref(), upload.content_type.as_deref());
        let key = avatar_key(student_id, &extension);

        let preview_width = config.preview_width;
        let bytes = upload.bytes;
        let (bytes, preview) = tokio::task::spawn_blocking(move || {
            generate_preview(&bytes, preview_width).map(|preview| (bytes, preview))
        })
        .await
        .context("Preview generation task failed")??;

        let media_type = upload
            .content_type
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or_else(|| preview.media_type().to_string());

        let previous_path = sqlx::query_scalar::<_, String>(
            "SELECT file_path FROM avatars WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?;

        let location = storage.save(&key, &bytes).await.map_err(|e| match e {
            StorageError::InvalidFileSize { .. } => AppError::from(SchoolError::FileTooBig),
            other => AppError::from(other),
        })?;

        let avatar = sqlx::query_as::<_, Avatar>(
            "INSERT INTO avatars (student_id, file_path, file_size, media_type, preview)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (student_id) DO UPDATE
             SET file_path = EXCLUDED.file_path,
                 file_size = EXCLUDED.file_size,
                 media_type = EXCLUDED.media_type,
                 preview = EXCLUDED.preview
             RETURNING id, student_id, file_path, file_size, media_type, preview",
        )
        .bind(student_id)
        .bind(&location)
        .bind(bytes.len() as i64)
        .bind(&media_type)
        .bind(&preview.bytes)
        .fetch_one(db)
        .await;

        let avatar = match avatar {
            Ok(avatar) => avatar,
            Err(e) => {
                // A file under a new key has no row pointing at it
                let orphaned =
                    previous_path.as_deref().and_then(storage_key_of) != Some(key.as_str());
                if orphaned && let Err(cleanup) = storage.delete(&key).await {
                    warn!(
                        error = %cleanup,
                        student.id = %student_id,
                        "Failed to remove unrecorded avatar file"
                    );
                }
                return Err(e.into());
            }
        };

        // A new extension leaves the old file orphaned
        if let Some(old_key) = previous_path.as_deref().and_then(storage_key_of)
            && old_key != key
            && let Err(e) = storage.delete(old_key).await
        {
            warn!(error = %e, student.id = %student_id, "Failed to remove replaced avatar file");
        }

        metrics::track_avatar_uploaded(bytes.len());
        info!(
            student.id = %student_id,
            avatar.id = %avatar.id,
            avatar.media_type = %avatar.media_type,
            preview.size = avatar.preview.len(),
            "Avatar stored successfully"
        );

        Ok(avatar)
    }

    /// Avatar metadata including the preview bytes.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "avatars"))]
    pub async fn get_avatar(db: &PgPool, student_id: StudentId) -> Result<Avatar, AppError> {
        let avatar = sqlx::query_as::<_, Avatar>(
            "SELECT id, student_id, file_path, file_size, media_type, preview
             FROM avatars WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            debug!(student.id = %student_id, "Student has no avatar");
            SchoolError::AvatarNotFound
        })?;

        Ok(avatar)
    }

    /// Avatar metadata with the original file content.
    #[instrument(skip(db, storage), fields(db.operation = "SELECT", db.table = "avatars"))]
    pub async fn get_original(
        db: &PgPool,
        storage: &dyn FileStorage,
        student_id: StudentId,
    ) -> Result<(Avatar, Vec<u8>), AppError> {
        let avatar = Self::get_avatar(db, student_id).await?;
        let key = avatar
            .storage_key()
            .ok_or_else(|| anyhow::anyhow!("Avatar {} has no file name", avatar.id))?;

        let bytes = storage.load(key).await.map_err(|e| match e {
            StorageError::NotFound => {
                warn!(student.id = %student_id, avatar.path = %avatar.file_path, "Avatar file is missing");
                AppError::from(SchoolError::AvatarNotFound)
            }
            other => AppError::from(other),
        })?;

        Ok((avatar, bytes))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "avatars"))]
    pub async fn list_avatars(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<PaginatedAvatarsResponse, AppError> {
        let limit = params.limit();
        let offset = params.offset();

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM avatars")
            .fetch_one(db)
            .await?;

        let avatars = sqlx::query_as::<_, Avatar>(
            "SELECT id, student_id, file_path, file_size, media_type
             FROM avatars ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        debug!(total, returned = avatars.len(), "Fetched avatar page");

        Ok(PaginatedAvatarsResponse {
            data: avatars,
            meta: PaginationMeta::new(params.page(), limit, total),
        })
    }
}
