//! # Selection Filter & Aggregator
//!
//! Produces the four views the dashboard draws from one immutable
//! [`Dataset`] and one [`RegionFilter`]:
//!
//! 1. **Region averages.** Mean utilization per region over *all* records,
//!    then restricted to the selected regions. The regional average never
//!    changes with the filter; only which regions are shown does.
//! 2. **Housing-type averages.** Mean utilization per (region, housing type)
//!    over the *filtered* records.
//! 3. **Bed counts.** Summed occupied and total beds per region over the
//!    *filtered* records, plus a long-form (region, status, count) relation.
//! 4. **Geo join.** Every boundary left-joined to the unrestricted region
//!    averages on region name, then restricted to the selection.
//!
//! Rows with no resolved region never form a group. Missing utilization
//! values are skipped by the means; missing counts add nothing to the sums.
//! Groups are reported in region-name order.

use std::collections::BTreeMap;

use geojson::Geometry;
use serde::Serialize;
use spa_core::{BedRecord, RegionBoundary, RegionFilter, RegionName};

use crate::dataset::Dataset;

/// Mean utilization of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAverage {
    pub region: RegionName,
    /// `None` when no record of the region carries a utilization value.
    pub utilization_rate: Option<f64>,
}

/// Mean utilization of one housing type within one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HousingTypeAverage {
    pub region: RegionName,
    pub housing_type: String,
    pub utilization_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct BedTotals {
    utilized: u64,
    total: u64,
}

/// Bed counts of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedCounts {
    pub region: RegionName,
    pub utilized: u64,
    pub total: u64,
}

impl BedCounts {
    /// `total - utilized`; negative when the data over-reports occupancy.
    /// Saturates at the bounds of `i64`.
    pub fn empty(&self) -> i64 {
        saturate(i128::from(self.total) - i128::from(self.utilized))
    }

    /// Count for one status.
    pub fn count(&self, status: BedStatus) -> i64 {
        match status {
            BedStatus::Utilized => saturate(i128::from(self.utilized)),
            BedStatus::Empty => self.empty(),
        }
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Bed status axis of the long-form bed count relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BedStatus {
    Utilized,
    Empty,
}

impl BedStatus {
    /// Both statuses, in the order they are charted.
    pub const ALL: [BedStatus; 2] = [BedStatus::Utilized, BedStatus::Empty];

    /// Series label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utilized => "Utilized Beds",
            Self::Empty => "Empty Beds",
        }
    }
}

/// One row of the long-form bed count relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedCountRow {
    pub region: RegionName,
    pub status: BedStatus,
    pub count: i64,
}

/// One boundary joined to its region average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRegion<'a> {
    /// Position of the boundary in the boundary file; used as the feature id.
    pub index: usize,
    pub region: Option<RegionName>,
    pub geometry: &'a Geometry,
    /// `None` when the region has no bed records (left join miss).
    pub utilization_rate: Option<f64>,
}

/// All four views for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Views<'a> {
    pub region_averages: Vec<RegionAverage>,
    pub housing_types: Vec<HousingTypeAverage>,
    pub bed_counts: Vec<BedCounts>,
    pub geo: Vec<GeoRegion<'a>>,
}

impl Views<'_> {
    /// Long-form bed counts: every region's utilized row, then every region's
    /// empty row.
    pub fn bed_count_rows(&self) -> Vec<BedCountRow> {
        melt_bed_counts(&self.bed_counts)
    }
}

/// Compute every view for `filter`.
pub fn aggregate<'a>(dataset: &'a Dataset, filter: &RegionFilter) -> Views<'a> {
    let all_averages = region_averages(dataset.records());

    let filtered: Vec<&BedRecord> = dataset
        .records()
        .iter()
        .filter(|r| filter.admits(r.region.as_ref()))
        .collect();

    let geo = geo_join(dataset.boundaries(), &all_averages)
        .into_iter()
        .filter(|g| filter.admits(g.region.as_ref()))
        .collect();

    let region_averages = all_averages
        .into_iter()
        .filter(|a| filter.admits(Some(&a.region)))
        .collect();

    Views {
        region_averages,
        housing_types: housing_type_averages(filtered.iter().copied()),
        bed_counts: bed_counts(filtered.iter().copied()),
        geo,
    }
}

/// Running mean that skips missing values.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean utilization per region across `records`.
pub fn region_averages<'a>(records: impl IntoIterator<Item = &'a BedRecord>) -> Vec<RegionAverage> {
    let mut groups: BTreeMap<&RegionName, Mean> = BTreeMap::new();
    for record in records {
        if let Some(region) = record.region.as_ref() {
            groups.entry(region).or_default().push(record.utilization_rate);
        }
    }
    groups
        .into_iter()
        .map(|(region, mean)| RegionAverage {
            region: region.clone(),
            utilization_rate: mean.value(),
        })
        .collect()
}

/// Mean utilization per (region, housing type) across `records`.
pub fn housing_type_averages<'a>(
    records: impl IntoIterator<Item = &'a BedRecord>,
) -> Vec<HousingTypeAverage> {
    let mut groups: BTreeMap<(&RegionName, &str), Mean> = BTreeMap::new();
    for record in records {
        if let (Some(region), Some(housing_type)) =
            (record.region.as_ref(), record.housing_type.as_deref())
        {
            groups
                .entry((region, housing_type))
                .or_default()
                .push(record.utilization_rate);
        }
    }
    groups
        .into_iter()
        .map(|((region, housing_type), mean)| HousingTypeAverage {
            region: region.clone(),
            housing_type: housing_type.to_string(),
            utilization_rate: mean.value(),
        })
        .collect()
}

/// Summed occupied and total beds per region across `records`. Sums
/// saturate at `u64::MAX`.
pub fn bed_counts<'a>(records: impl IntoIterator<Item = &'a BedRecord>) -> Vec<BedCounts> {
    let mut groups: BTreeMap<&RegionName, BedTotals> = BTreeMap::new();
    for record in records {
        if let Some(region) = record.region.as_ref() {
            let totals = groups.entry(region).or_default();
            totals.utilized = totals.utilized.saturating_add(record.pit_count.unwrap_or(0));
            totals.total = totals.total.saturating_add(record.total_beds.unwrap_or(0));
        }
    }
    groups
        .into_iter()
        .map(|(region, totals)| BedCounts {
            region: region.clone(),
            utilized: totals.utilized,
            total: totals.total,
        })
        .collect()
}

/// Reshape per-region counts into (region, status, count) rows.
pub fn melt_bed_counts(counts: &[BedCounts]) -> Vec<BedCountRow> {
    BedStatus::ALL
        .iter()
        .flat_map(|&status| {
            counts.iter().map(move |c| BedCountRow {
                region: c.region.clone(),
                status,
                count: c.count(status),
            })
        })
        .collect()
}

/// Left-join boundaries to region averages on region name, in boundary order.
pub fn geo_join<'a>(boundaries: &'a [RegionBoundary], averages: &[RegionAverage]) -> Vec<GeoRegion<'a>> {
    let by_region: BTreeMap<&RegionName, Option<f64>> = averages
        .iter()
        .map(|a| (&a.region, a.utilization_rate))
        .collect();
    boundaries
        .iter()
        .enumerate()
        .map(|(index, boundary)| GeoRegion {
            index,
            region: boundary.region.clone(),
            geometry: &boundary.geometry,
            utilization_rate: boundary
                .region
                .as_ref()
                .and_then(|r| by_region.get(r).copied().flatten()),
        })
        .collect()
}
