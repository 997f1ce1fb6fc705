use crate::modules::faculties::controller::{
    create_faculty, delete_faculty, find_by_color, get_all_faculties, get_faculty,
    get_faculty_students, longest_faculty_name, search_faculties, update_faculty,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_faculties_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_all_faculties)
                .post(create_faculty)
                .put(update_faculty),
        )
        .route("/search", get(find_by_color))
        .route("/multi-search", get(search_faculties))
        .route("/longest-name", get(longest_faculty_name))
        .route("/{id}", get(get_faculty).delete(delete_faculty))
        .route("/{id}/students", get(get_faculty_students))
}
