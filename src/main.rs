use anyhow::Context;
use dotenvy::dotenv;
use schoolhub::{init_app_state, init_router};
use schoolhub_config::AppConfig;
use schoolhub_observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Server running");
    info!("Swagger UI available at http://{addr}/api-docs");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
