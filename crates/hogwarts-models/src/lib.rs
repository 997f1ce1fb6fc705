//! # Hogwarts Models
//!
//! Domain models and DTOs for the Hogwarts API.
//!
//! This crate provides the data structures shared by the HTTP layer, the
//! services, and the CLI seeder: database rows, request/response DTOs, and
//! validation rules.
//!
//! # Modules
//!
//! - [`associations`]: Parsing of bulk student transfer requests
//! - [`avatars`]: Avatar metadata and upload helpers
//! - [`faculties`]: Faculty entity and DTOs
//! - [`ids`]: Strongly-typed numeric ids
//! - [`students`]: Student entity, DTOs, and age bounds
//! - [`validation`]: Shared validation rules
//!
//! # Example
//!
//! ```ignore
//! use hogwarts_models::students::CreateStudentDto;
//! use hogwarts_models::validation::DomainValidate;
//!
//! let dto = CreateStudentDto { name: "Harry".into(), age: 11 };
//! dto.check()?; // Err(SchoolError::InvalidStudentProps) when invalid
//! ```

pub mod associations;
pub mod avatars;
pub mod faculties;
pub mod ids;
pub mod students;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use associations::{IdListError, StudentIdList};
pub use avatars::{Avatar, PaginatedAvatarsResponse};
pub use faculties::{ColorQuery, CreateFacultyDto, Faculty, FacultySearchParams, UpdateFacultyDto};
pub use ids::{AvatarId, FacultyId, StudentId};
pub use students::{
    AgeQuery, AgeRangeQuery, CreateStudentDto, Student, StudentRow, UpdateStudentDto,
};
pub use validation::DomainValidate;
