//! # spa-data — Loading and Aggregation
//!
//! Reads the housing inventory count CSV and the SPA boundary GeoJSON once at
//! startup, resolves region codes on both with the same
//! [`spa_core::RegionLookup`], and holds the result as an immutable
//! [`Dataset`]. The [`aggregate`] module turns a dataset plus a
//! [`spa_core::RegionFilter`] into the four views the charts are drawn from.
//!
//! ## Data Flow
//!
//! ```text
//! CSV ──┐                         ┌─> region averages (unfiltered, then restricted)
//!       ├─> resolve ─> Dataset ───┼─> housing-type averages (filtered)
//! GeoJSON ┘                       ├─> bed counts, long form (filtered)
//!                                 └─> geo join (restricted)
//! ```

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod loader;

pub use aggregate::{
    BedCountRow, BedCounts, BedStatus, GeoRegion, HousingTypeAverage, RegionAverage, Views,
};
pub use dataset::{DataSources, Dataset};
pub use error::LoadError;
