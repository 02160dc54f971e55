//! webid-search - serves the WebID search page

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use webid_search::http::{build_router, AppState};
use webid_search::{load_config, HttpSearchClient};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config().await;
    let backend = HttpSearchClient::new(&config.api_base, config.timeout())
        .context("cannot build the search API client")?;
    info!("search API at {}", backend.endpoint());

    let app = build_router(AppState { backend: Arc::new(backend) });

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("cannot listen on {}", config.listen))?;
    info!("listening on http://{}", config.listen);
    axum::serve(listener, app).await?;
    Ok(())
}
