//! # spa-cli — Operator CLI for the SPA Dashboard
//!
//! Offline access to the same pipeline the HTTP server runs, without a
//! browser or a listening socket.
//!
//! ## Subcommands
//!
//! - `spa inspect` — load both input files and summarize them.
//! - `spa render` — run one reactive update and write the five outputs as JSON.
//!
//! ```bash
//! spa inspect --data beds.csv --boundaries spa.geojson
//! spa render --select "Antelope Valley" --select "Metro Los Angeles" --output update.json
//! ```

pub mod inspect;
pub mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use spa_charts::Dashboard;
use spa_core::{EmptySelectionPolicy, RegionColorMap, RegionLookup};
use spa_data::{DataSources, Dataset};

/// Input files and the empty-selection policy, shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Housing inventory count CSV.
    #[arg(long, value_name = "CSV", default_value = "2024-housing-inventory-count cleaned.csv")]
    pub data: PathBuf,

    /// SPA boundary GeoJSON.
    #[arg(long, value_name = "GEOJSON", default_value = "simplified_SPA.geojson")]
    pub boundaries: PathBuf,

    /// What an empty selection shows: "full" (every row) or "none".
    #[arg(long, value_name = "POLICY", default_value = "full")]
    pub empty_selection: EmptySelectionPolicy,
}

impl SourceArgs {
    pub fn sources(&self) -> DataSources {
        DataSources {
            records_path: self.data.clone(),
            boundaries_path: self.boundaries.clone(),
        }
    }

    /// Load and resolve both input files with the Los Angeles SPA table.
    pub fn load_dataset(&self) -> Result<Dataset> {
        let sources = self.sources();
        Dataset::load(&sources, &RegionLookup::los_angeles()).with_context(|| {
            format!(
                "failed to load {} and {}",
                sources.records_path.display(),
                sources.boundaries_path.display()
            )
        })
    }

    pub fn load_dashboard(&self) -> Result<Dashboard> {
        let dataset = self.load_dataset()?;
        Ok(Dashboard::new(dataset, RegionColorMap::los_angeles())
            .with_empty_selection(self.empty_selection))
    }
}
