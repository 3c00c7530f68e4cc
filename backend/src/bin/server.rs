//! Usage Dashboard HTTP Server Binary
//!
//! Loads configuration, builds the utilization source, runs the initial
//! dashboard load and serves the dashboard API.
//!
//! # Usage
//!
//! ```bash
//! # Against the remote API
//! API_BASE_URL=http://localhost:8000/api cargo run --bin usage-dashboard-server
//!
//! # Against a local JSON fixture
//! SOURCE_TYPE=local cargo run --bin usage-dashboard-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `API_BASE_URL`: Remote utilization API base URL
//! - `SOURCE_TYPE`: `http` or `local`
//! - `THEME_PATH`: Theme preference file
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use usage_dashboard::config::DashboardConfig;
use usage_dashboard::http::{create_router, AppState};
use usage_dashboard::services::DashboardSession;
use usage_dashboard::source::SourceFactory;
use usage_dashboard::theme::ThemeStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Usage Dashboard Server");

    let config = DashboardConfig::from_default_location()?.with_env_overrides()?;

    let source = SourceFactory::create(&config)?;
    let theme = Arc::new(ThemeStore::open(&config.theme.path)?);
    let session = Arc::new(DashboardSession::new(source));

    let initial = session.start().await;
    info!(phase = ?initial.phase, "Initial dashboard load finished");

    let app = create_router(AppState::new(session, theme));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
