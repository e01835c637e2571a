use std::sync::Arc;

use anyhow::Context;

use pantry_api::app::{ApiSettings, build_app, services::build_services};
use pantry_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pantry_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(build_services(&config).await?);
    let app = build_app(services, ApiSettings::from(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
