use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use hogwarts_core::{PaginationMeta, PaginationParams};
use hogwarts_models::{
    Avatar, CreateFacultyDto, CreateStudentDto, Faculty, PaginatedAvatarsResponse, Student,
    UpdateFacultyDto, UpdateStudentDto,
};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::faculties::controller::create_faculty,
        crate::modules::faculties::controller::get_faculty,
        crate::modules::faculties::controller::update_faculty,
        crate::modules::faculties::controller::delete_faculty,
        crate::modules::faculties::controller::find_by_color,
        crate::modules::faculties::controller::search_faculties,
        crate::modules::faculties::controller::get_faculty_students,
        crate::modules::faculties::controller::get_all_faculties,
        crate::modules::faculties::controller::longest_faculty_name,
        crate::modules::students::controller::enroll_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::find_by_age,
        crate::modules::students::controller::find_by_age_between,
        crate::modules::students::controller::get_student_faculty,
        crate::modules::students::controller::get_all_students,
        crate::modules::students::controller::count_students,
        crate::modules::students::controller::average_age,
        crate::modules::students::controller::last_five_students,
        crate::modules::associations::controller::change_student_faculty,
        crate::modules::associations::controller::change_faculty_students,
        crate::modules::avatars::controller::upload_avatar,
        crate::modules::avatars::controller::get_avatar_preview,
        crate::modules::avatars::controller::get_avatar_original,
        crate::modules::avatars::controller::list_avatars,
        crate::modules::info::get_port,
        crate::modules::performance::sequential_fold,
        crate::modules::performance::sequential_loop,
        crate::modules::performance::parallel_sum,
        crate::modules::performance::parallel_reduce,
    ),
    components(
        schemas(
            Faculty,
            CreateFacultyDto,
            UpdateFacultyDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            Avatar,
            PaginatedAvatarsResponse,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Faculties", description = "Faculty management endpoints"),
        (name = "Students", description = "Student enrolment and queries"),
        (name = "Associations", description = "Moving students between faculties"),
        (name = "Avatars", description = "Student profile pictures and previews"),
        (name = "Info", description = "Server information"),
        (name = "Performance", description = "Sequential versus parallel summation")
    ),
    info(
        title = "Hogwarts School API",
        version = "0.1.0",
        description = "School records REST API built with Rust, Axum, and PostgreSQL: faculties, students, avatars.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
