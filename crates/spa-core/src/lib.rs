//! # spa-core — Foundational Types for the SPA Dashboard
//!
//! Defines the vocabulary shared by every other crate in the workspace:
//! the Service Planning Area (SPA) region names and the fixed code lookup
//! that produces them, the region color policy, the bed record and region
//! boundary rows, and the dropdown selection state.
//!
//! ## Key Design Principles
//!
//! 1. **One resolver for both datasets.** Bed records and region boundaries
//!    are keyed by the same [`RegionName`], produced by the same
//!    [`RegionLookup`]. Join keys match by plain string equality.
//!
//! 2. **Missing, not wrong.** A code outside the lookup table resolves to
//!    `None`. Downstream aggregations drop those rows from every
//!    region-keyed group instead of failing.
//!
//! 3. **Selections are normalized once.** [`Selection::resolve`] expands the
//!    `"ALL"` sentinel and applies the [`EmptySelectionPolicy`], producing
//!    both the row filter and the value echoed back to the control.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `spa-*` crates (this is the leaf of the DAG).
//! - No I/O. Loading lives in `spa-data`.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod color;
pub mod error;
pub mod record;
pub mod region;
pub mod selection;

// Re-export primary types for ergonomic imports.
pub use color::{RegionColorMap, DEFAULT_SEQUENCE};
pub use error::PolicyParseError;
pub use record::{BedRecord, RegionBoundary};
pub use region::{RegionLookup, RegionName, SPA_REGION_TABLE};
pub use selection::{
    EmptySelectionPolicy, RegionFilter, ResolvedSelection, Selection, ALL_SENTINEL,
    ALL_SENTINEL_LABEL,
};
