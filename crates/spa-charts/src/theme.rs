//! # Shared Chart Styling
//!
//! Colors and labels used by more than one renderer.

use crate::figure::Layout;

/// Paper and plot background of every figure.
pub const BACKGROUND: &str = "rgba(169,169,169,1)";

/// Housing type series colors, cycled in first-appearance order. Kept
/// distinct from the region palette.
pub const HOUSING_TYPE_PALETTE: [&str; 3] = ["#4D4D4D", "#FFFF66", "#FFFFFF"];

/// Bed status series colors: utilized, then empty.
pub const BED_STATUS_PALETTE: [&str; 2] = ["#4D4D4D", "#FFFF66"];

/// Category axis label.
pub const REGION_AXIS_LABEL: &str = "SPA";

/// Utilization axis label.
pub const UTILIZATION_AXIS_LABEL: &str = "Avg. Utilization Rate  (%)";

/// A layout with the dashboard background applied.
pub(crate) fn base_layout() -> Layout {
    Layout {
        paper_bgcolor: Some(BACKGROUND.to_string()),
        plot_bgcolor: Some(BACKGROUND.to_string()),
        ..Layout::default()
    }
}

/// Hover text for a bar: optional `(dimension, series)` line, then region and value.
pub(crate) fn bar_hovertemplate(group: Option<(&str, &str)>, value_label: &str) -> String {
    let prefix = group
        .map(|(dimension, series)| format!("{dimension}={series}<br>"))
        .unwrap_or_default();
    format!("{prefix}{REGION_AXIS_LABEL}=%{{x}}<br>{value_label}=%{{y}}<extra></extra>")
}
