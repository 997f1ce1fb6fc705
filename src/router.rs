use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::modules::associations::init_associations_router;
use crate::modules::avatars::init_avatars_router;
use crate::modules::faculties::init_faculties_router;
use crate::modules::info::init_info_router;
use crate::modules::performance::init_performance_router;
use crate::modules::students::init_students_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
}

pub fn init_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/faculties", init_faculties_router())
        .nest("/students", init_students_router())
        .nest("/associations", init_associations_router())
        .nest("/avatars", init_avatars_router())
        .nest("/test-performance", init_performance_router())
        .merge(init_info_router());

    if let Some(handle) = state.metrics.clone() {
        router = router.merge(metrics_app(handle));
    }

    router
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
