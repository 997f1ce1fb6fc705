use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use hogwarts_core::AppError;
use hogwarts_models::{
    AgeQuery, AgeRangeQuery, CreateStudentDto, Faculty, FacultyId, Student, StudentId,
    UpdateStudentDto,
};

use crate::docs::ErrorResponse;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::{AppJson, ValidatedJson};

#[utoipa::path(
    post,
    path = "/students/{facultyId}",
    params(("facultyId" = i64, Path, description = "Faculty to enroll the student in")),
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student enrolled successfully", body = Student),
        (status = 400, description = "Invalid properties or name already taken", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn enroll_student(
    State(state): State<AppState>,
    Path(faculty_id): Path<FacultyId>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::enroll_student(&state.db, faculty_id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/students",
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Invalid properties or a faculty change was attempted", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_student(
    State(state): State<AppState>,
    AppJson(dto): AppJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student and avatar deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, state.storage.as_ref(), id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/students/search",
    params(AgeQuery),
    responses(
        (status = 200, description = "Students of the given age", body = Vec<Student>),
        (status = 400, description = "Age outside 7..=20", body = ErrorResponse),
        (status = 404, description = "Nobody has this age", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn find_by_age(
    State(state): State<AppState>,
    Query(query): Query<AgeQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::find_by_age(&state.db, query.age).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/students/search-between",
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "Students aged within the inclusive range", body = Vec<Student>),
        (status = 400, description = "A bound lies outside 7..=20", body = ErrorResponse),
        (status = 404, description = "Nobody is in the range", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn find_by_age_between(
    State(state): State<AppState>,
    Query(range): Query<AgeRangeQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::find_by_age_between(&state.db, range.from, range.to).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/students/{id}/faculty",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student's faculty, or null", body = Option<Faculty>),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_faculty(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Option<Faculty>>, AppError> {
    let faculty = StudentService::get_student_faculty(&state.db, id).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students ordered by id", body = Vec<Student>),
        (status = 404, description = "No students exist", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_all_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::get_all_students(&state.db).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/students/count",
    responses((status = 200, description = "Number of students", body = i64)),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn count_students(State(state): State<AppState>) -> Result<Json<i64>, AppError> {
    let count = StudentService::count_students(&state.db).await?;
    Ok(Json(count))
}

#[utoipa::path(
    get,
    path = "/students/average-age",
    responses((status = 200, description = "Average age rounded down, 0 when empty", body = i64)),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn average_age(State(state): State<AppState>) -> Result<Json<i64>, AppError> {
    let average = StudentService::average_age(&state.db).await?;
    Ok(Json(average))
}

#[utoipa::path(
    get,
    path = "/students/last-five",
    responses((status = 200, description = "Five newest students, newest first", body = Vec<Student>)),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn last_five_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::last_five_students(&state.db).await?;
    Ok(Json(students))
}
