//! # Selection State
//!
//! The dropdown value: a list of region names, possibly containing the
//! `"ALL"` sentinel. [`Selection::resolve`] turns it into the row filter used
//! by the aggregator and the normalized value written back to the control.
//!
//! ## Normalization rules
//!
//! | Raw value | Filter | Echoed value |
//! |-----------|--------|--------------|
//! | contains `"ALL"` | every known region | every known region, sorted |
//! | empty | per [`EmptySelectionPolicy`] | empty |
//! | anything else | exactly the listed names | unchanged |

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyParseError;
use crate::region::RegionName;

/// Dropdown value meaning "every known region".
pub const ALL_SENTINEL: &str = "ALL";

/// Dropdown label shown for [`ALL_SENTINEL`].
pub const ALL_SENTINEL_LABEL: &str = "Select All";

/// What an empty selection filters to.
///
/// `FullDataset` keeps the long-standing dashboard behavior where clearing
/// the dropdown shows everything. `NoRegions` makes an empty selection
/// produce empty charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    #[default]
    FullDataset,
    NoRegions,
}

impl EmptySelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullDataset => "full",
            Self::NoRegions => "none",
        }
    }
}

impl fmt::Display for EmptySelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmptySelectionPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "full_dataset" => Ok(Self::FullDataset),
            "none" | "no_regions" => Ok(Self::NoRegions),
            other => Err(PolicyParseError(other.to_string())),
        }
    }
}

/// Raw dropdown value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// A selection holding only the sentinel.
    pub fn all() -> Self {
        Self(vec![ALL_SENTINEL.to_string()])
    }

    /// A selection naming each of `regions`.
    pub fn of_regions<'a>(regions: impl IntoIterator<Item = &'a RegionName>) -> Self {
        Self(regions.into_iter().map(|r| r.as_str().to_string()).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the sentinel appears anywhere in the value.
    pub fn contains_all_sentinel(&self) -> bool {
        self.0.iter().any(|v| v == ALL_SENTINEL)
    }

    /// Expand the sentinel and apply the empty-selection policy.
    ///
    /// `known` is the full set of known region names; it is sorted and
    /// deduplicated here, so callers may pass any order.
    pub fn resolve(&self, known: &[RegionName], policy: EmptySelectionPolicy) -> ResolvedSelection {
        if self.contains_all_sentinel() {
            let names: BTreeSet<String> = known.iter().map(|r| r.as_str().to_string()).collect();
            let normalized = Selection(names.iter().cloned().collect());
            return ResolvedSelection {
                filter: RegionFilter::Only(names),
                normalized,
            };
        }

        if self.is_empty() {
            let filter = match policy {
                EmptySelectionPolicy::FullDataset => RegionFilter::Unfiltered,
                EmptySelectionPolicy::NoRegions => RegionFilter::Only(BTreeSet::new()),
            };
            return ResolvedSelection {
                filter,
                normalized: Selection::default(),
            };
        }

        ResolvedSelection {
            filter: RegionFilter::Only(self.0.iter().cloned().collect()),
            normalized: self.clone(),
        }
    }
}

impl From<Vec<String>> for Selection {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Which rows survive the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    /// No filtering; every row is kept.
    Unfiltered,
    /// Only rows whose resolved region is in the set.
    Only(BTreeSet<String>),
}

impl RegionFilter {
    /// Whether a row with this resolved region passes the filter.
    ///
    /// Rows with no resolved region pass only when unfiltered, and even then
    /// they never form a region group.
    pub fn admits(&self, region: Option<&RegionName>) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Only(names) => region.is_some_and(|r| names.contains(r.as_str())),
        }
    }
}

/// Output of [`Selection::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub filter: RegionFilter,
    /// Value to write back to the dropdown.
    pub normalized: Selection,
}
