//! Faculty domain models and DTOs.

use hogwarts_core::SchoolError;
use hogwarts_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::FacultyId;
use crate::validation::{DomainValidate, not_blank};

/// A faculty students can be enrolled in.
///
/// The reverse collection of students is queried separately and never
/// serialised with the faculty.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub color: String,
}

/// DTO for creating a new faculty.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateFacultyDto {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub color: String,
}

impl DomainValidate for CreateFacultyDto {
    const REJECTION: SchoolError = SchoolError::InvalidFacultyProps;
}

/// DTO for replacing the name and color of an existing faculty.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateFacultyDto {
    pub id: FacultyId,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub color: String,
}

impl DomainValidate for UpdateFacultyDto {
    const REJECTION: SchoolError = SchoolError::InvalidFacultyProps;
}

/// Query for an exact, case-insensitive color lookup.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ColorQuery {
    /// Faculty color, e.g. `red`
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub color: Option<String>,
}

/// Query for matching faculties by color or name.
///
/// Both filters are optional and combined with OR.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacultySearchParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_faculty_dto_validation() {
        let dto = CreateFacultyDto {
            name: "Gryffindor".to_string(),
            color: "red".to_string(),
        };
        assert!(dto.check().is_ok());
    }

    #[test]
    fn test_create_faculty_dto_blank_name() {
        let dto = CreateFacultyDto {
            name: "   ".to_string(),
            color: "red".to_string(),
        };
        assert_eq!(dto.check(), Err(SchoolError::InvalidFacultyProps));
    }

    #[test]
    fn test_create_faculty_dto_blank_color() {
        let dto = CreateFacultyDto {
            name: "Ravenclaw".to_string(),
            color: String::new(),
        };
        assert_eq!(dto.check(), Err(SchoolError::InvalidFacultyProps));
    }

    #[test]
    fn test_update_faculty_dto_deserialize() {
        let json = r#"{"id": 4, "name": "Hufflepuff", "color": "yellow"}"#;
        let dto: UpdateFacultyDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.id, FacultyId::new(4));
        assert!(dto.check().is_ok());
    }

    #[test]
    fn test_faculty_serialize() {
        let faculty = Faculty {
            id: FacultyId::new(1),
            name: "Gryffindor".to_string(),
            color: "red".to_string(),
        };
        let json = serde_json::to_value(&faculty).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Gryffindor", "color": "red"})
        );
    }

    #[test]
    fn test_search_params_treat_blank_as_absent() {
        let json = r#"{"color": " ", "name": "Slytherin"}"#;
        let params: FacultySearchParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.color, None);
        assert_eq!(params.name.as_deref(), Some("Slytherin"));
    }
}
