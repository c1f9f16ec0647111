//! relewise-demo server binary

use anyhow::{Context, Result};
use relewise_demo::api::{create_router, ApiState};
use relewise_demo::{DemoConfig, FormController, HttpConnector, TracingLogger};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config from file
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "relewise-demo.toml".to_string());

    let config = DemoConfig::load(&config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path))?
        .with_env_overrides();

    // Initialize logging
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting relewise-demo server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_path = %config_path,
        timeout_secs = config.request_timeout_secs,
        prefilled_dataset = config.defaults.dataset_id.is_some(),
        "Loaded configuration"
    );
    if config.defaults.api_key.is_none() {
        warn!("No default API key configured (set RELEWISE_API_KEY or [defaults].api_key)");
    }

    let connector = Arc::new(HttpConnector::new(config.request_timeout()));
    let controller = FormController::new(connector, Arc::new(TracingLogger), config.defaults.clone());

    let state = Arc::new(ApiState { controller });
    let app = create_router(state);

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_addr))?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
