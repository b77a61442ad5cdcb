//! # Region Color Policy
//!
//! Fixed mapping from region name to display color, shared by the map and
//! the regional bar charts so a region keeps one color everywhere.

use std::collections::BTreeMap;

use crate::region::RegionName;

/// Default plotly qualitative sequence. Regions absent from the map take
/// colors from here, indexed by their position among the traces of a figure.
pub const DEFAULT_SEQUENCE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Region name → display color.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionColorMap {
    colors: BTreeMap<RegionName, String>,
}

impl RegionColorMap {
    /// Colors for the eight Los Angeles County SPAs.
    pub fn los_angeles() -> Self {
        Self::from_pairs([
            ("Antelope Valley", "#636EFA"),
            ("San Fernando Valley", "#EF553B"),
            ("San Gabriel Valley", "#00CC96"),
            ("Metro Los Angeles", "#AB63FA"),
            ("West Los Angeles", "#FFA15A"),
            ("South Los Angeles", "#19D3F3"),
            ("East Los Angeles", "#FF6692"),
            ("South Bay/Harbor", "#B6E880"),
        ])
    }

    /// Build a map from `(region, color)` pairs.
    pub fn from_pairs<N, C>(pairs: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        let colors = pairs
            .into_iter()
            .map(|(name, color)| (RegionName::new(name), color.into()))
            .collect();
        Self { colors }
    }

    /// The mapped color for a region, if any.
    pub fn get(&self, region: &str) -> Option<&str> {
        self.colors.get(region).map(String::as_str)
    }

    /// The mapped color, or the default sequence entry for trace `ordinal`.
    pub fn color_for(&self, region: &str, ordinal: usize) -> &str {
        self.get(region)
            .unwrap_or(DEFAULT_SEQUENCE[ordinal % DEFAULT_SEQUENCE.len()])
    }

    /// Number of mapped regions.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no region is mapped.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
