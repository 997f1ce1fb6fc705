use crate::modules::associations::controller::{change_faculty_students, change_student_faculty};
use crate::state::AppState;
use axum::{Router, routing::put};

pub fn init_associations_router() -> Router<AppState> {
    Router::new()
        .route(
            "/student/{student_id}/change-faculty/{faculty_id}",
            put(change_student_faculty),
        )
        .route(
            "/faculty/{faculty_id}/change-students/{id_list}",
            put(change_faculty_students),
        )
}
