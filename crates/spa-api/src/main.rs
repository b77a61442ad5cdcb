//! # spa-api — Binary Entry Point
//!
//! Loads the bed inventory and SPA boundaries, then serves the dashboard on
//! all interfaces. The port comes from `PORT` (default 8050).

use metrics_exporter_prometheus::PrometheusBuilder;
use spa_api::state::{AppConfig, AppState};
use spa_charts::Dashboard;
use spa_core::{RegionColorMap, RegionLookup};
use spa_data::Dataset;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;

    // Input files are read once; failure here is fatal.
    let dataset = Dataset::load(&config.sources, &RegionLookup::los_angeles()).map_err(|e| {
        tracing::error!("Failed to load input data: {e}");
        e
    })?;

    let recorder = PrometheusBuilder::new().install_recorder().map_err(|e| {
        tracing::error!("Failed to install Prometheus recorder: {e}");
        e
    })?;
    spa_api::middleware::metrics::describe();

    let dashboard = Dashboard::new(dataset, RegionColorMap::los_angeles())
        .with_empty_selection(config.empty_selection);
    let state = AppState::new(dashboard).with_metrics(recorder);
    tracing::info!(
        regions = state.dashboard.known_regions().len(),
        empty_selection = %config.empty_selection,
        "dashboard ready"
    );

    let app = spa_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("SPA dashboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
