//! # Dataset Rows
//!
//! [`BedRecord`] is one facility/program/time-period observation from the
//! housing inventory count. [`RegionBoundary`] is one SPA polygon from the
//! boundary file. Both carry the raw code they were loaded with alongside the
//! resolved [`RegionName`].

use geojson::Geometry;
use serde::Serialize;

use crate::region::RegionName;

/// One bed inventory observation.
///
/// `pit_count <= total_beds` is expected but not enforced; a violating row
/// simply yields a negative empty-bed count downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedRecord {
    /// Raw `SPA` cell as read from the file.
    pub code: String,
    /// Resolved region; `None` when the code is not in the lookup table.
    pub region: Option<RegionName>,
    /// Housing type category (e.g. "Emergency Shelter").
    pub housing_type: Option<String>,
    /// Total bed capacity.
    pub total_beds: Option<u64>,
    /// Point-in-time count of occupied beds.
    pub pit_count: Option<u64>,
    /// Utilization percentage, nominally in `[0, 100]`.
    pub utilization_rate: Option<f64>,
}

impl BedRecord {
    /// A fully populated record for an already resolved region.
    pub fn new(
        region: impl Into<RegionName>,
        housing_type: impl Into<String>,
        total_beds: u64,
        pit_count: u64,
        utilization_rate: f64,
    ) -> Self {
        let region = region.into();
        Self {
            code: region.as_str().to_string(),
            region: Some(region),
            housing_type: Some(housing_type.into()),
            total_beds: Some(total_beds),
            pit_count: Some(pit_count),
            utilization_rate: Some(utilization_rate),
        }
    }

    /// `100 * pit_count / total_beds`, when both counts are present and
    /// capacity is non-zero.
    pub fn derived_utilization(&self) -> Option<f64> {
        match (self.pit_count, self.total_beds) {
            (Some(pit), Some(total)) if total > 0 => Some(100.0 * pit as f64 / total as f64),
            _ => None,
        }
    }
}

/// One region polygon or multipolygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionBoundary {
    /// Raw `SPA` property as text.
    pub code: String,
    /// Resolved region; `None` when the code is not in the lookup table.
    pub region: Option<RegionName>,
    pub geometry: Geometry,
}
