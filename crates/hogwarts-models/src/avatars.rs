//! Avatar metadata models.

use hogwarts_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::path::Path;
use utoipa::ToSchema;

use crate::ids::{AvatarId, StudentId};

/// Name of the multipart field carrying the uploaded image.
pub const AVATAR_FIELD: &str = "avatar";

/// Stored avatar of a student.
///
/// `preview` holds the thumbnail bytes. It is skipped in JSON and left empty
/// by listing queries that do not select it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct Avatar {
    pub id: AvatarId,
    pub student_id: StudentId,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
    #[serde(skip)]
    #[sqlx(default)]
    pub preview: Vec<u8>,
}

impl Avatar {
    /// Storage key of the original file, i.e. the final path component.
    pub fn storage_key(&self) -> Option<&str> {
        storage_key_of(&self.file_path)
    }
}

/// Final path component of a stored file location.
pub fn storage_key_of(file_path: &str) -> Option<&str> {
    Path::new(file_path).file_name().and_then(|name| name.to_str())
}

/// Page of avatar metadata.
#[derive(Serialize, ToSchema)]
pub struct PaginatedAvatarsResponse {
    pub data: Vec<Avatar>,
    pub meta: PaginationMeta,
}

/// Extension for a stored avatar.
///
/// Taken from the uploaded filename after the last `.`; when there is none,
/// derived from the declared content type.
pub fn avatar_extension(filename: Option<&str>, content_type: Option<&str>) -> String {
    let from_name = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return ext.to_ascii_lowercase();
    }

    match content_type.map(str::trim) {
        Some("image/png") => "png",
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        _ => "bin",
    }
    .to_string()
}

/// Storage key for a student's avatar: `{studentId}.{ext}`.
pub fn avatar_key(student_id: StudentId, extension: &str) -> String {
    format!("{}.{}", student_id, extension)
}
