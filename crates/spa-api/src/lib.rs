//! # spa-api — HTTP Surface for the SPA Dashboard
//!
//! Serves the single-page dashboard: a static page shell, the page layout,
//! and the reactive update that redraws all four charts for a region
//! selection. The update itself is [`spa_charts::Dashboard::update`]; this
//! crate only wires it to HTTP.
//!
//! ## API Surface
//!
//! | Path                 | Module                    | Purpose                 |
//! |----------------------|---------------------------|-------------------------|
//! | `/`                  | [`routes::dashboard`]     | page shell (HTML)       |
//! | `/v1/layout`         | [`routes::dashboard`]     | Layout Builder output   |
//! | `/v1/update`         | [`routes::dashboard`]     | reactive update         |
//! | `/openapi.json`      | [`openapi`]               | OpenAPI document        |
//! | `/metrics`           | here                      | Prometheus exposition   |
//! | `/health/*`          | here                      | liveness and readiness  |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod layout;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) sit outside the metrics and trace layers.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::dashboard::router())
        .merge(openapi::router())
        .route("/metrics", get(prometheus_metrics))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// GET /metrics — Prometheus text exposition, or 404 without a recorder.
async fn prometheus_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::NotFound("metrics exporter is not installed".to_string()))?;
    Ok((
        [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        handle.render(),
    ))
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The dataset is loaded before the listener binds, so a
/// serving process is always ready.
async fn readiness() -> &'static str {
    "ready"
}
