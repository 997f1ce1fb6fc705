//! Student domain models and DTOs.
//!
//! This module contains the student entity, the flat row it is loaded from,
//! request DTOs, and the age query parameters.

use hogwarts_core::SchoolError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::faculties::Faculty;
use crate::ids::{FacultyId, StudentId};
use crate::validation::{DomainValidate, not_blank};

/// Youngest age a student may have.
pub const MIN_AGE: i32 = 7;
/// Oldest age a student may have.
pub const MAX_AGE: i32 = 20;

/// Returns `true` when `age` lies within the enrolment range.
#[inline]
pub const fn is_valid_age(age: i32) -> bool {
    age >= MIN_AGE && age <= MAX_AGE
}

/// A student, with the faculty embedded or `null` when expelled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub faculty: Option<Faculty>,
}

/// Student joined with its faculty columns.
///
/// Every student query selects `s.id, s.name, s.age` plus
/// `f.id AS faculty_id, f.name AS faculty_name, f.color AS faculty_color`
/// through a `LEFT JOIN faculties`.
#[derive(FromRow, Debug, Clone)]
pub struct StudentRow {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<FacultyId>,
    pub faculty_name: Option<String>,
    pub faculty_color: Option<String>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        let faculty = match (row.faculty_id, row.faculty_name, row.faculty_color) {
            (Some(id), Some(name), Some(color)) => Some(Faculty { id, name, color }),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            faculty,
        }
    }
}

/// DTO for enrolling a new student.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 7, max = 20))]
    pub age: i32,
}

impl DomainValidate for CreateStudentDto {
    const REJECTION: SchoolError = SchoolError::InvalidStudentProps;
}

/// DTO for changing a student's name and age.
///
/// `faculty` is accepted only so a request carrying one can be rejected;
/// faculty changes go through the associations endpoints.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateStudentDto {
    pub id: StudentId,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 7, max = 20))]
    pub age: i32,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub faculty: Option<serde_json::Value>,
}

impl UpdateStudentDto {
    /// Whether the request tries to set a faculty.
    pub fn carries_faculty(&self) -> bool {
        self.faculty.as_ref().is_some_and(|value| !value.is_null())
    }
}

impl DomainValidate for UpdateStudentDto {
    const REJECTION: SchoolError = SchoolError::InvalidStudentProps;
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgeQuery {
    pub age: i32,
}

/// Inclusive age range.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgeRangeQuery {
    pub from: i32,
    pub to: i32,
}
