use axum::{Router, extract::State, routing::get};
use tracing::instrument;

use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/getPort",
    responses(
        (status = 200, description = "Port the server listens on", body = String, content_type = "text/plain")
    ),
    tag = "Info"
)]
#[instrument(skip(state))]
pub async fn get_port(State(state): State<AppState>) -> String {
    state.server_config.port.to_string()
}

pub fn init_info_router() -> Router<AppState> {
    Router::new().route("/getPort", get(get_port))
}
