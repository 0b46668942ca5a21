use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use caltorss_core::CalToRssConfig;
use caltorss_core::tracing::{TracingConfig, init_tracing};
use caltorss_server::app;
use caltorss_server::state::AppState;

#[derive(Parser)]
#[command(name = "caltorss-server", about = "Serve ICS calendars as RSS feeds", version)]
struct Args {
    /// Path to a config file (defaults to ~/.config/caltorss/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = CalToRssConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }

    init_tracing(
        TracingConfig::default()
            .with_level(config.log_level.clone())
            .with_format(config.log_format),
    )?;

    let state = AppState::new(&config)?;
    let app = app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("caltorss-server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
