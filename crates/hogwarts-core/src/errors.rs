//! Application error types.
//!
//! Handlers return [`AppError`], a status code paired with an
//! [`anyhow::Error`]. Domain failures are raised as [`SchoolError`] and keep
//! their mapped status when converted with `?`; storage failures do the same
//! through [`StorageError::status_code`]. Everything else is a 500.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::file_storage::StorageError;

/// Domain failures with a fixed client-facing message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchoolError {
    #[error("Faculty not found")]
    FacultyNotFound,

    #[error("Student not found")]
    StudentNotFound,

    #[error("Student doesn't have profile picture")]
    AvatarNotFound,

    #[error("Such a faculty already exists")]
    FacultyAlreadyExists,

    #[error("Such a student already exists")]
    StudentAlreadyExists,

    #[error("Requirements for faculty properties: 'name' and 'color' must contain characters")]
    InvalidFacultyProps,

    #[error(
        "Requirements for student properties: 1. 'name' must contain characters, 2. 'age' should be in range of 7 to 20"
    )]
    InvalidStudentProps,

    #[error("Age should be between 7 and 20")]
    BadAge,

    #[error("Color should be valid")]
    BadColor,

    #[error("File is too big")]
    FileTooBig,

    #[error(
        "Try '/faculties' resource to edit faculty. If you want to change student's faculty - '/associations'"
    )]
    EditPermission,

    #[error("Uploaded file is not a readable image")]
    UnreadableImage,
}

impl SchoolError {
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::FacultyNotFound | Self::StudentNotFound | Self::AvatarNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::FacultyAlreadyExists
            | Self::StudentAlreadyExists
            | Self::InvalidFacultyProps
            | Self::InvalidStudentProps
            | Self::BadAge
            | Self::BadColor
            | Self::FileTooBig
            | Self::EditPermission
            | Self::UnreadableImage => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Returns the domain error behind this error, if any.
    pub fn school_error(&self) -> Option<SchoolError> {
        self.error.downcast_ref::<SchoolError>().copied()
    }
}

fn status_for(error: &Error) -> StatusCode {
    if let Some(school_error) = error.downcast_ref::<SchoolError>() {
        return school_error.status_code();
    }
    if let Some(storage_error) = error.downcast_ref::<StorageError>() {
        return storage_error.status_code();
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        let status = status_for(&error);
        Self { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_map_to_404() {
        for err in [
            SchoolError::FacultyNotFound,
            SchoolError::StudentNotFound,
            SchoolError::AvatarNotFound,
        ] {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_client_errors_map_to_400() {
        for err in [
            SchoolError::FacultyAlreadyExists,
            SchoolError::StudentAlreadyExists,
            SchoolError::InvalidFacultyProps,
            SchoolError::InvalidStudentProps,
            SchoolError::BadAge,
            SchoolError::BadColor,
            SchoolError::FileTooBig,
            SchoolError::EditPermission,
            SchoolError::UnreadableImage,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_question_mark_keeps_domain_status() {
        fn lookup() -> Result<(), AppError> {
            Err(SchoolError::StudentNotFound)?;
            Ok(())
        }

        let err = lookup().unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.school_error(), Some(SchoolError::StudentNotFound));
        assert_eq!(err.error.to_string(), "Student not found");
    }

    #[test]
    fn test_context_does_not_hide_domain_status() {
        use anyhow::Context;

        let result: Result<(), SchoolError> = Err(SchoolError::FileTooBig);
        let err: AppError = result.context("Uploading avatar").unwrap_err().into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let err: AppError = StorageError::NotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let err: AppError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.school_error(), None);
    }

    #[test]
    fn test_explicit_status_is_kept() {
        let err = AppError::bad_request(anyhow::anyhow!("Invalid id list"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
