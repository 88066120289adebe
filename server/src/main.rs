use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wellness_journal_server::backend::{create_router, initialize_backend};
use wellness_journal_server::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.cors_origin);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Wellness journal API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
