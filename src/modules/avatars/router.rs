use crate::modules::avatars::controller::{
    get_avatar_original, get_avatar_preview, list_avatars, upload_avatar,
};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

pub fn init_avatars_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_avatars))
        // The upload handler enforces the avatar cap while streaming
        .route(
            "/{id}",
            post(upload_avatar).layer(DefaultBodyLimit::disable()),
        )
        .route("/{id}/preview", get(get_avatar_preview))
        .route("/{id}/real", get(get_avatar_original))
}
