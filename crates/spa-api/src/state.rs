//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. Everything in it is immutable after startup, so it
//! is shared behind `Arc`s without locks.

use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use spa_charts::Dashboard;
use spa_core::{EmptySelectionPolicy, PolicyParseError};
use spa_data::DataSources;

use crate::layout::{self, PageLayout};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8050;

pub const PORT_VAR: &str = "PORT";
pub const DATA_PATH_VAR: &str = "SPA_DATA_PATH";
pub const BOUNDARIES_PATH_VAR: &str = "SPA_BOUNDARIES_PATH";
pub const EMPTY_SELECTION_VAR: &str = "SPA_EMPTY_SELECTION";

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind on all interfaces.
    pub port: u16,
    pub sources: DataSources,
    pub empty_selection: EmptySelectionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            sources: DataSources::default(),
            empty_selection: EmptySelectionPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, PolicyParseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `var`. Unset variables keep their
    /// defaults; an unparsable `PORT` falls back to [`DEFAULT_PORT`].
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, PolicyParseError> {
        let defaults = Self::default();

        let port = var(PORT_VAR)
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let sources = DataSources {
            records_path: var(DATA_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.sources.records_path),
            boundaries_path: var(BOUNDARIES_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.sources.boundaries_path),
        };

        let empty_selection = match var(EMPTY_SELECTION_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.empty_selection,
        };

        Ok(Self {
            port,
            sources,
            empty_selection,
        })
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub layout: Arc<PageLayout>,
    /// Present when a Prometheus recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("regions", &self.dashboard.known_regions().len())
            .field("empty_selection", &self.dashboard.empty_selection())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Wrap a loaded dashboard and build its page layout.
    pub fn new(dashboard: Dashboard) -> Self {
        let layout = layout::build(dashboard.known_regions());
        Self {
            dashboard: Arc::new(dashboard),
            layout: Arc::new(layout),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
