use anyhow::Context;

use quickadmin_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quickadmin_observability::init();

    let config = ApiConfig::from_env()?;
    quickadmin_core::util::json::configure(config.json)?;

    let app = quickadmin_api::app::build_app(&config.jwt_secret);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
