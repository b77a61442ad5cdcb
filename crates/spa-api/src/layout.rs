//! # Layout Builder
//!
//! The static page structure, built once at startup from the known region
//! names: header text, the region dropdown, four chart slots in two rows and
//! the loading indicator. The page shell at `/` fetches it from `/v1/layout`
//! and renders it.

use serde::Serialize;
use spa_charts::theme::BACKGROUND;
use spa_core::{RegionName, ALL_SENTINEL, ALL_SENTINEL_LABEL};
use utoipa::ToSchema;

pub const TITLE: &str = "2024 Point-In-Time (PIT) Bed Utilization Rate Analysis";
pub const SUBTITLE: &str = "Los Angeles Homeless Services Authority (LAHSA)";

pub const DROPDOWN_ID: &str = "slicer-dropdown";
pub const DROPDOWN_LABEL: &str = "Select Service Planning Area (SPA)";
pub const DROPDOWN_PLACEHOLDER: &str = "Select SPA...";

pub const MAP_SLOT: &str = "map-graph";
pub const REGION_BAR_SLOT: &str = "bar-graph";
pub const HOUSING_TYPE_SLOT: &str = "housing-type-bar";
pub const BED_COUNT_SLOT: &str = "bed-count-bar";

pub const LOADING_INDICATOR_ID: &str = "loading-icon";

/// Whole page description.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PageLayout {
    pub title: String,
    pub subtitle: String,
    /// Background shared by the dropdown and every chart.
    pub background: String,
    pub dropdown: Dropdown,
    /// Chart slots, row by row.
    pub rows: Vec<Vec<GraphSlot>>,
    /// Full-page indicator shown while an update is pending.
    pub loading_indicator_id: String,
}

/// The region multi-select control.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dropdown {
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub multi: bool,
    pub options: Vec<DropdownOption>,
    /// Initial control value.
    pub value: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// One chart placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GraphSlot {
    pub id: String,
    pub display_mode_bar: bool,
}

impl GraphSlot {
    fn new(id: &str, display_mode_bar: bool) -> Self {
        Self {
            id: id.to_string(),
            display_mode_bar,
        }
    }
}

/// Dropdown options: the "Select All" sentinel, then one per region.
pub fn dropdown_options(known: &[RegionName]) -> Vec<DropdownOption> {
    std::iter::once(DropdownOption {
        label: ALL_SENTINEL_LABEL.to_string(),
        value: ALL_SENTINEL.to_string(),
    })
    .chain(known.iter().map(|name| DropdownOption {
        label: name.as_str().to_string(),
        value: name.as_str().to_string(),
    }))
    .collect()
}

/// Build the page for `known` regions. Every region starts selected.
pub fn build(known: &[RegionName]) -> PageLayout {
    PageLayout {
        title: TITLE.to_string(),
        subtitle: SUBTITLE.to_string(),
        background: BACKGROUND.to_string(),
        dropdown: Dropdown {
            id: DROPDOWN_ID.to_string(),
            label: DROPDOWN_LABEL.to_string(),
            placeholder: DROPDOWN_PLACEHOLDER.to_string(),
            multi: true,
            options: dropdown_options(known),
            value: known.iter().map(|n| n.as_str().to_string()).collect(),
        },
        rows: vec![
            vec![
                GraphSlot::new(MAP_SLOT, true),
                GraphSlot::new(REGION_BAR_SLOT, false),
            ],
            vec![
                GraphSlot::new(HOUSING_TYPE_SLOT, false),
                GraphSlot::new(BED_COUNT_SLOT, false),
            ],
        ],
        loading_indicator_id: LOADING_INDICATOR_ID.to_string(),
    }
}
