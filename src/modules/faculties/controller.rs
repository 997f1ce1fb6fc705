use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use hogwarts_core::AppError;
use hogwarts_models::{
    ColorQuery, CreateFacultyDto, Faculty, FacultyId, FacultySearchParams, Student,
    UpdateFacultyDto,
};

use crate::docs::ErrorResponse;
use crate::modules::faculties::service::FacultyService;
use crate::state::AppState;
use crate::validator::{AppJson, ValidatedJson};

#[utoipa::path(
    post,
    path = "/faculties",
    request_body = CreateFacultyDto,
    responses(
        (status = 200, description = "Faculty created successfully", body = Faculty),
        (status = 400, description = "Invalid properties or name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacultyDto>,
) -> Result<Json<Faculty>, AppError> {
    let faculty = FacultyService::create_faculty(&state.db, dto).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    get,
    path = "/faculties/{id}",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Faculty details", body = Faculty),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<FacultyId>,
) -> Result<Json<Faculty>, AppError> {
    let faculty = FacultyService::get_faculty(&state.db, id).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    put,
    path = "/faculties",
    request_body = UpdateFacultyDto,
    responses(
        (status = 200, description = "Faculty updated successfully", body = Faculty),
        (status = 400, description = "Invalid properties or name already taken", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn update_faculty(
    State(state): State<AppState>,
    AppJson(dto): AppJson<UpdateFacultyDto>,
) -> Result<Json<Faculty>, AppError> {
    let faculty = FacultyService::update_faculty(&state.db, dto).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    delete,
    path = "/faculties/{id}",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Faculty deleted, its students detached"),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<FacultyId>,
) -> Result<StatusCode, AppError> {
    FacultyService::delete_faculty(&state.db, id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/faculties/search",
    params(ColorQuery),
    responses(
        (status = 200, description = "Faculties with the given color", body = Vec<Faculty>),
        (status = 400, description = "Color is blank", body = ErrorResponse),
        (status = 404, description = "No faculty has this color", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn find_by_color(
    State(state): State<AppState>,
    Query(query): Query<ColorQuery>,
) -> Result<Json<Vec<Faculty>>, AppError> {
    let faculties = FacultyService::find_by_color(&state.db, query.color.as_deref()).await?;
    Ok(Json(faculties))
}

#[utoipa::path(
    get,
    path = "/faculties/multi-search",
    params(FacultySearchParams),
    responses(
        (status = 200, description = "Faculties matching the color or the name", body = Vec<Faculty>),
        (status = 404, description = "Nothing matched", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn search_faculties(
    State(state): State<AppState>,
    Query(params): Query<FacultySearchParams>,
) -> Result<Json<Vec<Faculty>>, AppError> {
    let faculties = FacultyService::search(&state.db, &params).await?;
    Ok(Json(faculties))
}

#[utoipa::path(
    get,
    path = "/faculties/{id}/students",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Students enrolled in the faculty", body = Vec<Student>),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn get_faculty_students(
    State(state): State<AppState>,
    Path(id): Path<FacultyId>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = FacultyService::get_faculty_students(&state.db, id).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/faculties",
    responses(
        (status = 200, description = "All faculties ordered by id", body = Vec<Faculty>),
        (status = 404, description = "No faculties exist", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn get_all_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Faculty>>, AppError> {
    let faculties = FacultyService::get_all_faculties(&state.db).await?;
    Ok(Json(faculties))
}

#[utoipa::path(
    get,
    path = "/faculties/longest-name",
    responses(
        (status = 200, description = "Longest faculty name", body = String, content_type = "text/plain"),
        (status = 404, description = "No faculties exist", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn longest_faculty_name(State(state): State<AppState>) -> Result<String, AppError> {
    FacultyService::longest_name(&state.db).await
}
