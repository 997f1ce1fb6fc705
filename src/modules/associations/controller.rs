use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use hogwarts_core::AppError;
use hogwarts_models::{FacultyId, Student, StudentId, StudentIdList};

use crate::docs::ErrorResponse;
use crate::modules::associations::service::AssociationService;
use crate::state::AppState;

#[utoipa::path(
    put,
    path = "/associations/student/{studentId}/change-faculty/{facultyId}",
    params(
        ("studentId" = i64, Path, description = "Student to move"),
        ("facultyId" = i64, Path, description = "Destination faculty")
    ),
    responses(
        (status = 200, description = "Student with the new faculty", body = Student),
        (status = 404, description = "Student or faculty not found", body = ErrorResponse)
    ),
    tag = "Associations"
)]
#[instrument(skip(state))]
pub async fn change_student_faculty(
    State(state): State<AppState>,
    Path((student_id, faculty_id)): Path<(StudentId, FacultyId)>,
) -> Result<Json<Student>, AppError> {
    let student = AssociationService::change_faculty(&state.db, student_id, faculty_id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/associations/faculty/{facultyId}/change-students/{idList}",
    params(
        ("facultyId" = i64, Path, description = "Destination faculty"),
        ("idList" = String, Path, description = "Comma separated student ids, e.g. `1,2,3`")
    ),
    responses(
        (status = 200, description = "All students of the faculty", body = Vec<Student>),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 404, description = "Faculty or a student not found", body = ErrorResponse)
    ),
    tag = "Associations"
)]
#[instrument(skip(state))]
pub async fn change_faculty_students(
    State(state): State<AppState>,
    Path((faculty_id, id_list)): Path<(FacultyId, String)>,
) -> Result<Json<Vec<Student>>, AppError> {
    let ids: StudentIdList = id_list.parse().map_err(AppError::bad_request)?;

    let students = AssociationService::change_students(&state.db, faculty_id, &ids).await?;
    Ok(Json(students))
}
