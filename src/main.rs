use std::sync::Arc;

use monitor_sat_api::api;
use monitor_sat_api::config::Config;
use monitor_sat_api::handlers::AppState;
use monitor_sat_api::monitor::SatMonitor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Loads configuration, initializes tracing, builds the Finkok client and
/// serves the HTTP API until the process is stopped.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first: DEBUG decides the default log level
    let config = Config::from_env()?;

    let default_filter = if config.debug {
        "monitor_sat_api=debug,tower_http=debug"
    } else {
        "monitor_sat_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Monitor SAT Backend...");
    config.log_summary();

    let monitor = SatMonitor::from_config(&config)?;
    tracing::info!("✓ Finkok client initialized: {}", config.finkok_api_url);

    if let Err(e) = monitor.credentials().ensure_directory().await {
        tracing::warn!("Could not create certificate directory: {}", e);
    }

    let app_state = Arc::new(AppState { monitor });
    let app = api::build_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
