use std::sync::Arc;

use anyhow::Context;
use hogwarts_config::{AvatarConfig, CorsConfig, DatabaseConfig, ServerConfig};
use hogwarts_core::{FileStorage, LocalFileStorage};
use hogwarts_db::{init_db_pool, run_migrations};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub server_config: ServerConfig,
    pub avatar_config: AvatarConfig,
    pub cors_config: CorsConfig,
    pub storage: Arc<dyn FileStorage>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Builds state around an existing pool, storing avatars on local disk.
    pub fn new(
        db: PgPool,
        server_config: ServerConfig,
        avatar_config: AvatarConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let storage = LocalFileStorage::with_max_size(
            avatar_config.dir.clone(),
            avatar_config.max_bytes,
        );

        Self {
            db,
            server_config,
            avatar_config,
            cors_config,
            storage: Arc::new(storage),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;

    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    Ok(AppState::new(
        db,
        ServerConfig::from_env(),
        AvatarConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
