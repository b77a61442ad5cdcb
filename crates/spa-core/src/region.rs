//! # Region Name Resolver
//!
//! Maps raw SPA codes (`"1"` through `"8"`) to human-readable region names.
//! The same [`RegionLookup`] is applied to the bed records and to the region
//! boundaries so that both datasets join on identical [`RegionName`] values.
//!
//! Codes are compared as exact text. `"1"` resolves, `"01"` and `"1.0"` do
//! not, and neither does any code outside the table.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed Los Angeles County SPA code table.
///
/// | Code | Region |
/// |------|--------|
/// | 1 | Antelope Valley |
/// | 2 | San Fernando Valley |
/// | 3 | San Gabriel Valley |
/// | 4 | Metro Los Angeles |
/// | 5 | West Los Angeles |
/// | 6 | South Los Angeles |
/// | 7 | East Los Angeles |
/// | 8 | South Bay/Harbor |
pub const SPA_REGION_TABLE: [(&str, &str); 8] = [
    ("1", "Antelope Valley"),
    ("2", "San Fernando Valley"),
    ("3", "San Gabriel Valley"),
    ("4", "Metro Los Angeles"),
    ("5", "West Los Angeles"),
    ("6", "South Los Angeles"),
    ("7", "East Los Angeles"),
    ("8", "South Bay/Harbor"),
];

/// Human-readable name of a Service Planning Area.
///
/// Ordering is lexicographic on the name, which is the order every
/// region-keyed aggregation reports its groups in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionName(String);

impl RegionName {
    /// Wrap a region name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RegionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Lookup table from raw region code to [`RegionName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLookup {
    table: BTreeMap<String, RegionName>,
}

impl RegionLookup {
    /// The eight Los Angeles County Service Planning Areas.
    pub fn los_angeles() -> Self {
        Self::from_pairs(SPA_REGION_TABLE)
    }

    /// Build a lookup from `(code, name)` pairs. Later pairs win on duplicate codes.
    pub fn from_pairs<C, N>(pairs: impl IntoIterator<Item = (C, N)>) -> Self
    where
        C: Into<String>,
        N: Into<String>,
    {
        let table = pairs
            .into_iter()
            .map(|(code, name)| (code.into(), RegionName::new(name)))
            .collect();
        Self { table }
    }

    /// Resolve a raw code. Codes outside the table resolve to `None`.
    pub fn resolve(&self, code: &str) -> Option<RegionName> {
        self.table.get(code).cloned()
    }

    /// Every region name in the table, in code order.
    pub fn names(&self) -> impl Iterator<Item = &RegionName> {
        self.table.values()
    }

    /// Number of codes in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for RegionLookup {
    fn default() -> Self {
        Self::los_angeles()
    }
}
