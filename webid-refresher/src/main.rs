//! webid-refresher - rewrites the WebID directory snapshot
//!
//! Exit status is 0 when the snapshot was written, 1 otherwise.

use anyhow::{Context, Result};
use tracing::error;
use tracing_subscriber::EnvFilter;
use webid_refresher::{load_config, Refresher, RefresherConfig};

#[tokio::main]
async fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config().await;
    if let Err(e) = refresh(&config).await {
        error!("Crawler failed: {e:#}");
        std::process::exit(1);
    }
}

async fn refresh(config: &RefresherConfig) -> Result<()> {
    let refresher = Refresher::from_config(config).context("cannot set up the refresher")?;
    refresher.run().await?;
    Ok(())
}
