//! # Bed Count Bar Chart
//!
//! Grouped utilized vs. empty bars per region, drawn from the long-form
//! bed count relation.

use spa_data::BedCountRow;

use crate::figure::{Axis, AxisTitle, BarMarker, BarMode, BarTrace, Figure, Legend, Title, Trace};
use crate::theme::{self, BED_STATUS_PALETTE, REGION_AXIS_LABEL};

pub const TITLE: &str = "Count of Bed Utilization by SPA";

pub const Y_AXIS_LABEL: &str = "Bed Count";

/// Legend title attached to the status series.
const STATUS_DIMENSION: &str = "Bed Status";

pub fn render(rows: &[BedCountRow]) -> Figure {
    let mut series: Vec<BarTrace> = Vec::new();

    for row in rows {
        let label = row.status.label();
        let index = match series.iter().position(|s| s.name == label) {
            Some(index) => index,
            None => {
                let ordinal = series.len();
                series.push(BarTrace {
                    name: label.to_string(),
                    x: Vec::new(),
                    y: Vec::new(),
                    text: None,
                    texttemplate: None,
                    textposition: None,
                    marker: BarMarker {
                        color: BED_STATUS_PALETTE[ordinal % BED_STATUS_PALETTE.len()].to_string(),
                    },
                    offsetgroup: label.to_string(),
                    legendgroup: label.to_string(),
                    showlegend: true,
                    hovertemplate: theme::bar_hovertemplate(
                        Some((STATUS_DIMENSION, label)),
                        Y_AXIS_LABEL,
                    ),
                });
                ordinal
            }
        };
        series[index].x.push(row.region.as_str().to_string());
        series[index].y.push(Some(row.count as f64));
    }

    let mut layout = theme::base_layout();
    layout.title = Some(Title::new(TITLE));
    layout.barmode = Some(BarMode::Group);
    layout.legend = Some(Legend {
        title: Title::new(""),
    });
    layout.xaxis = Some(Axis {
        title: Some(AxisTitle::new(REGION_AXIS_LABEL)),
        ..Axis::default()
    });
    layout.yaxis = Some(Axis {
        title: Some(AxisTitle {
            text: Y_AXIS_LABEL.to_string(),
            standoff: Some(10),
        }),
        automargin: Some(true),
        gridcolor: Some("white".to_string()),
        zeroline: Some(true),
        zerolinewidth: Some(2.0),
        zerolinecolor: Some("gray".to_string()),
        ..Axis::default()
    });

    Figure {
        data: series.into_iter().map(Trace::Bar).collect(),
        layout,
    }
}
