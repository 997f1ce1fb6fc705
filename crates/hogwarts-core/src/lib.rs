//! # Hogwarts Core
//!
//! Core types, errors, and utilities for the Hogwarts API.
//!
//! This crate provides foundational types used throughout the Hogwarts application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`file_storage`]: Storage backends for avatar images
//! - [`pagination`]: Pagination utilities for API responses
//! - [`serde`]: Custom serde deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use hogwarts_core::errors::{AppError, SchoolError};
//! use hogwarts_core::pagination::PaginationParams;
//!
//! // Domain errors carry their own HTTP status
//! let error: AppError = SchoolError::StudentNotFound.into();
//! assert_eq!(error.status, StatusCode::NOT_FOUND);
//!
//! // Use pagination
//! let params = PaginationParams::default();
//! let limit = params.limit();
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, SchoolError};
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use pagination::{PaginationMeta, PaginationParams};
