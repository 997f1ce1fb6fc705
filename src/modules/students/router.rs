use crate::modules::students::controller::{
    average_age, count_students, delete_student, enroll_student, find_by_age,
    find_by_age_between, get_all_students, get_student, get_student_faculty, last_five_students,
    update_student,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_students).put(update_student))
        .route("/search", get(find_by_age))
        .route("/search-between", get(find_by_age_between))
        .route("/count", get(count_students))
        .route("/average-age", get(average_age))
        .route("/last-five", get(last_five_students))
        // POST takes the faculty id; axum needs one parameter name per segment
        .route(
            "/{id}",
            get(get_student).post(enroll_student).delete(delete_student),
        )
        .route("/{id}/faculty", get(get_student_faculty))
}
