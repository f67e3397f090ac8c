use std::sync::Arc;

use schoolhub_config::{AppConfig, CorsConfig, JwtConfig};
use schoolhub_db::{MIGRATOR, PgStore, Store, init_db_pool};
use schoolhub_observability::{PrometheusHandle, init_metrics};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

/// Connects to PostgreSQL, applies pending migrations and installs the metrics recorder.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db_pool(&config.database).await?;
    MIGRATOR.run(&pool).await?;
    info!("Database migrations applied");

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        config.jwt.clone(),
        config.cors.clone(),
    )
    .with_metrics(init_metrics()?);

    Ok(state)
}
