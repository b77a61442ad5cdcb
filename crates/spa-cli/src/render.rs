//! # Render Subcommand
//!
//! Runs one reactive update offline and writes the five outputs (four
//! figures, then the normalized selection) as JSON. Without `--select` the
//! update uses every known region, the same value the page starts with.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use spa_core::Selection;

use crate::SourceArgs;

/// Arguments for the `spa render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Region to select; repeat for several. "ALL" selects every region.
    #[arg(long = "select", value_name = "NAME")]
    pub select: Vec<String>,

    /// Send the update with no regions selected.
    #[arg(long, conflicts_with = "select")]
    pub empty: bool,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the render subcommand. JSON goes to `--output` when given, else `out`.
pub fn run_render(args: &RenderArgs, out: &mut impl Write) -> Result<u8> {
    let dashboard = args.sources.load_dashboard()?;

    let selection = if args.empty {
        Selection::default()
    } else if args.select.is_empty() {
        Selection::of_regions(dashboard.known_regions())
    } else {
        Selection::new(args.select.iter().cloned())
    };

    let update = dashboard.update(&selection);
    tracing::info!(
        selected = update.selection.values().len(),
        "rendered dashboard update"
    );

    let json = serde_json::to_string_pretty(&update)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote update");
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(0)
}
