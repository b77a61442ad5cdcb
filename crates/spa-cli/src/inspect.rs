//! # Inspect Subcommand
//!
//! Loads both input files and reports what the dashboard would see: row
//! counts, the known regions, rows whose code did not resolve, and
//! boundary regions with no bed records.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use spa_data::Dataset;

use crate::SourceArgs;

/// Arguments for the `spa inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Summary of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub records: usize,
    pub boundaries: usize,
    pub known_regions: Vec<String>,
    pub unresolved_records: usize,
    pub regions_without_records: Vec<String>,
}

impl InspectReport {
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            records: dataset.records().len(),
            boundaries: dataset.boundaries().len(),
            known_regions: dataset
                .known_regions()
                .iter()
                .map(|r| r.as_str().to_string())
                .collect(),
            unresolved_records: dataset.unresolved_record_count(),
            regions_without_records: dataset
                .regions_without_records()
                .into_iter()
                .map(|r| r.as_str().to_string())
                .collect(),
        }
    }

    pub fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "records:            {}", self.records)?;
        writeln!(out, "boundaries:         {}", self.boundaries)?;
        writeln!(out, "unresolved records: {}", self.unresolved_records)?;
        writeln!(out, "known regions ({}):", self.known_regions.len())?;
        for region in &self.known_regions {
            writeln!(out, "  {region}")?;
        }
        if !self.regions_without_records.is_empty() {
            writeln!(out, "boundary regions without records:")?;
            for region in &self.regions_without_records {
                writeln!(out, "  {region}")?;
            }
        }
        Ok(())
    }
}

/// Execute the inspect subcommand, writing the report to `out`.
pub fn run_inspect(args: &InspectArgs, out: &mut impl Write) -> Result<u8> {
    let dataset = args.sources.load_dataset()?;
    let report = InspectReport::of(&dataset);
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(0)
}
