//! File storage abstraction layer.
//!
//! Avatar images live outside the database. This module provides a
//! trait-based storage abstraction so business logic only deals with
//! storage keys such as `42.png`.
//!
//! # Example
//!
//! ```ignore
//! use hogwarts_core::file_storage::{FileStorage, LocalFileStorage};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::with_max_size(PathBuf::from("./avatars"), 300 * 1024);
//!
//! // Save a file, getting back its on-disk location
//! let location = storage.save("42.png", &bytes).await?;
//!
//! // Read it back
//! let bytes = storage.load("42.png").await?;
//!
//! // Delete a file
//! storage.delete("42.png").await?;
//! ```

use axum::http::StatusCode;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;

type StorageFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Abstract trait for file storage backends.
///
/// Implementations can be swapped without changing business logic.
pub trait FileStorage: Send + Sync {
    /// Save file content under `key`, replacing any existing file.
    ///
    /// # Returns
    /// The location the file was written to.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Read the full content stored under `key`.
    fn load<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Vec<u8>>;

    /// Delete a file by key.
    ///
    /// # Returns
    /// `Ok(())` if successful or file doesn't exist, or a `StorageError`.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// File not found.
    NotFound,

    /// Invalid storage key format.
    InvalidKey(String),
}

impl StorageError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFileSize { .. } | Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::NotFound => write!(f, "File not found"),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::IoError(e)
        }
    }
}

/// Local filesystem-based file storage implementation.
///
/// Keys are flat file names inside `base_dir`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    /// Base directory where files are stored
    base_dir: PathBuf,

    /// Maximum file size in bytes
    max_file_size: usize,
}

impl LocalFileStorage {
    /// Create a new local file storage with custom max file size.
    pub fn with_max_size(base_dir: PathBuf, max_file_size: usize) -> Self {
        Self {
            base_dir,
            max_file_size,
        }
    }

    /// Validate storage key format to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        // Flat keys only: alphanumerics, hyphens, underscores, and dots
        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            fs::create_dir_all(&self.base_dir).await?;

            let file_path = self.base_dir.join(key);
            fs::write(&file_path, content).await?;

            Ok(file_path.display().to_string())
        })
    }

    fn load<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Vec<u8>> {
        Box::pin(async move {
            Self::validate_key(key)?;

            let content = fs::read(self.base_dir.join(key)).await?;
            Ok(content)
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(key)?;

            let file_path = self.base_dir.join(key);

            // Delete file, ignore "not found" errors
            match fs::remove_file(&file_path).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStorage::validate_key("42.png").is_ok());
        assert!(LocalFileStorage::validate_key("7.jpg").is_ok());
        assert!(LocalFileStorage::validate_key("profile_pic.webp").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("..\\windows\\system32").is_err());
    }

    #[test]
    fn test_validate_key_rejects_nested_and_absolute_paths() {
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("students/1.png").is_err());
        assert!(LocalFileStorage::validate_key("").is_err());
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::with_max_size(temp_dir.path().join("avatars"), 1024);

        let location = storage.save("1.png", b"image-bytes").await.unwrap();
        assert!(location.ends_with("1.png"));

        let content = storage.load("1.png").await.unwrap();
        assert_eq!(content, b"image-bytes");

        storage.delete("1.png").await.unwrap();
        assert!(matches!(
            storage.load("1.png").await,
            Err(StorageError::NotFound)
        ));

        // Deleting again is not an error
        storage.delete("1.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::with_max_size(temp_dir.path().to_path_buf(), 1024);

        storage.save("2.gif", b"first").await.unwrap();
        storage.save("2.gif", b"second").await.unwrap();

        assert_eq!(storage.load("2.gif").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::with_max_size(temp_dir.path().to_path_buf(), 4);

        let result = storage.save("3.png", b"too large").await;
        assert!(matches!(
            result,
            Err(StorageError::InvalidFileSize { max_bytes: 4 })
        ));
    }
}
