//! # Immutable Dataset
//!
//! The bed records and region boundaries, loaded once at process start and
//! shared read-only for the life of the process.

use std::collections::BTreeSet;
use std::path::PathBuf;

use spa_core::{BedRecord, RegionBoundary, RegionLookup, RegionName};

use crate::error::LoadError;
use crate::loader;

/// Where the two input files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub records_path: PathBuf,
    pub boundaries_path: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from("2024-housing-inventory-count cleaned.csv"),
            boundaries_path: PathBuf::from("simplified_SPA.geojson"),
        }
    }
}

/// Loaded, resolved, read-only input data.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<BedRecord>,
    boundaries: Vec<RegionBoundary>,
    known_regions: Vec<RegionName>,
}

impl Dataset {
    /// Build a dataset from already resolved rows.
    pub fn new(records: Vec<BedRecord>, boundaries: Vec<RegionBoundary>) -> Self {
        let known_regions = records
            .iter()
            .filter_map(|r| r.region.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            records,
            boundaries,
            known_regions,
        }
    }

    /// Read both input files and resolve their region codes with `lookup`.
    pub fn load(sources: &DataSources, lookup: &RegionLookup) -> Result<Self, LoadError> {
        let records = loader::load_bed_records(&sources.records_path, lookup)?;
        let boundaries = loader::load_boundaries(&sources.boundaries_path, lookup)?;
        let dataset = Self::new(records, boundaries);
        tracing::info!(
            records = dataset.records.len(),
            boundaries = dataset.boundaries.len(),
            regions = dataset.known_regions.len(),
            unresolved_records = dataset.unresolved_record_count(),
            "dataset ready"
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[BedRecord] {
        &self.records
    }

    pub fn boundaries(&self) -> &[RegionBoundary] {
        &self.boundaries
    }

    /// Distinct resolved region names across the bed records, sorted.
    pub fn known_regions(&self) -> &[RegionName] {
        &self.known_regions
    }

    /// Bed records whose code did not resolve.
    pub fn unresolved_record_count(&self) -> usize {
        self.records.iter().filter(|r| r.region.is_none()).count()
    }

    /// Resolved boundary regions that have no bed records.
    pub fn regions_without_records(&self) -> Vec<&RegionName> {
        self.boundaries
            .iter()
            .filter_map(|b| b.region.as_ref())
            .filter(|r| self.known_regions.binary_search(r).is_err())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Geometry, Value};

    fn boundary(code: &str, region: Option<&str>) -> RegionBoundary {
        RegionBoundary {
            code: code.to_string(),
            region: region.map(RegionName::new),
            geometry: Geometry::new(Value::Point(vec![0.0, 0.0])),
        }
    }

    #[test]
    fn known_regions_are_distinct_and_sorted() {
        let records = vec![
            BedRecord::new("B", "ES", 10, 5, 50.0),
            BedRecord::new("A", "ES", 10, 5, 50.0),
            BedRecord::new("B", "TH", 10, 5, 50.0),
        ];
        let dataset = Dataset::new(records, Vec::new());
        let names: Vec<&str> = dataset.known_regions().iter().map(RegionName::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn unresolved_records_are_counted_not_known() {
        let mut orphan = BedRecord::new("A", "ES", 10, 5, 50.0);
        orphan.code = "9".to_string();
        orphan.region = None;
        let dataset = Dataset::new(vec![orphan, BedRecord::new("A", "ES", 1, 1, 100.0)], Vec::new());
        assert_eq!(dataset.unresolved_record_count(), 1);
        assert_eq!(dataset.known_regions().len(), 1);
    }

    #[test]
    fn boundary_regions_without_records() {
        let dataset = Dataset::new(
            vec![BedRecord::new("A", "ES", 10, 5, 50.0)],
            vec![boundary("a", Some("A")), boundary("c", Some("C")), boundary("x", None)],
        );
        let missing: Vec<&str> = dataset.regions_without_records().into_iter().map(RegionName::as_str).collect();
        assert_eq!(missing, vec!["C"]);
    }

    #[test]
    fn load_reads_both_files() {
        use std::io::Write;

        let mut csv = tempfile::NamedTempFile::new().unwrap();
        csv.write_all(b"SPA,Housing Type,Utilization Rate,PIT Count,Total Beds\n1,ES,80,80,100\n")
            .unwrap();
        let mut geo = tempfile::NamedTempFile::new().unwrap();
        geo.write_all(
            br#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"SPA":1},"geometry":{"type":"Point","coordinates":[-118.2,34.5]}}]}"#,
        )
        .unwrap();

        let sources = DataSources {
            records_path: csv.path().to_path_buf(),
            boundaries_path: geo.path().to_path_buf(),
        };
        let dataset = Dataset::load(&sources, &RegionLookup::los_angeles()).unwrap();
        assert_eq!(dataset.records().len(), 1);
        assert_eq!(dataset.boundaries().len(), 1);
        assert_eq!(dataset.known_regions()[0].as_str(), "Antelope Valley");
    }
}
