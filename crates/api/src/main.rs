use std::sync::Arc;

use anyhow::Context;

use nutrifacts_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nutrifacts_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = nutrifacts_api::app::build_services(&config).await?;
    let app = nutrifacts_api::app::build_app(Arc::new(services));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
