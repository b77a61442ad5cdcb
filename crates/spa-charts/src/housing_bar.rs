//! # Housing Type Bar Chart
//!
//! Grouped bars: one series per housing type, one group per region. Series
//! colors cycle through [`HOUSING_TYPE_PALETTE`] in the order housing types
//! first appear in the (region, housing type) sorted view.

use spa_data::HousingTypeAverage;

use crate::figure::{
    Axis, AxisTitle, BarMarker, BarMode, BarTrace, Figure, Legend, MinorTicks, TickMode, Title,
    Trace,
};
use crate::theme::{self, HOUSING_TYPE_PALETTE, REGION_AXIS_LABEL, UTILIZATION_AXIS_LABEL};

pub const TITLE: &str = "Average Bed Utilization Rate by Housing Type by SPA";

/// Grouping dimension, used as the legend title.
pub const LEGEND_TITLE: &str = "Housing Type";

pub fn render(averages: &[HousingTypeAverage]) -> Figure {
    let mut series: Vec<BarTrace> = Vec::new();

    for average in averages {
        let housing_type = average.housing_type.as_str();
        let index = match series.iter().position(|s| s.name == housing_type) {
            Some(index) => index,
            None => {
                let ordinal = series.len();
                series.push(BarTrace {
                    name: housing_type.to_string(),
                    x: Vec::new(),
                    y: Vec::new(),
                    text: None,
                    texttemplate: None,
                    textposition: None,
                    marker: BarMarker {
                        color: HOUSING_TYPE_PALETTE[ordinal % HOUSING_TYPE_PALETTE.len()]
                            .to_string(),
                    },
                    offsetgroup: housing_type.to_string(),
                    legendgroup: housing_type.to_string(),
                    showlegend: true,
                    hovertemplate: theme::bar_hovertemplate(
                        Some((LEGEND_TITLE, housing_type)),
                        UTILIZATION_AXIS_LABEL,
                    ),
                });
                ordinal
            }
        };
        series[index].x.push(average.region.as_str().to_string());
        series[index].y.push(average.utilization_rate);
    }

    let mut layout = theme::base_layout();
    layout.title = Some(Title::new(TITLE));
    layout.barmode = Some(BarMode::Group);
    layout.legend = Some(Legend {
        title: Title::new(LEGEND_TITLE),
    });
    layout.xaxis = Some(Axis {
        title: Some(AxisTitle::new(REGION_AXIS_LABEL)),
        ..Axis::default()
    });
    layout.yaxis = Some(Axis {
        title: Some(AxisTitle::new(UTILIZATION_AXIS_LABEL)),
        tickmode: Some(TickMode::Linear),
        tick0: Some(0.0),
        dtick: Some(10.0),
        showgrid: Some(true),
        gridwidth: Some(2.0),
        gridcolor: Some("white".to_string()),
        minor: Some(MinorTicks {
            tickmode: TickMode::Linear,
            tick0: 0.0,
            dtick: 5.0,
            showgrid: true,
            gridwidth: 0.5,
            gridcolor: "gray".to_string(),
        }),
        ..Axis::default()
    });

    Figure {
        data: series.into_iter().map(Trace::Bar).collect(),
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spa_core::RegionName;

    fn average(region: &str, housing_type: &str, rate: f64) -> HousingTypeAverage {
        HousingTypeAverage {
            region: RegionName::new(region),
            housing_type: housing_type.to_string(),
            utilization_rate: Some(rate),
        }
    }

    #[test]
    fn series_per_housing_type_in_first_appearance_order() {
        let figure = render(&[
            average("A", "Emergency Shelter", 80.0),
            average("A", "Transitional Housing", 90.0),
            average("B", "Emergency Shelter", 70.0),
            average("B", "Safe Haven", 60.0),
        ]);
        let bars: Vec<_> = figure.bars().collect();
        let names: Vec<&str> = bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Emergency Shelter", "Transitional Housing", "Safe Haven"]);

        assert_eq!(bars[0].x, vec!["A", "B"]);
        assert_eq!(bars[0].y, vec![Some(80.0), Some(70.0)]);
        assert_eq!(bars[1].x, vec!["A"]);
        assert_eq!(bars[2].x, vec!["B"]);

        let colors: Vec<&str> = bars.iter().map(|b| b.marker.color.as_str()).collect();
        assert_eq!(colors, vec!["#4D4D4D", "#FFFF66", "#FFFFFF"]);
    }

    #[test]
    fn palette_cycles_past_three_series() {
        let figure = render(&[
            average("A", "t1", 1.0),
            average("A", "t2", 1.0),
            average("A", "t3", 1.0),
            average("A", "t4", 1.0),
        ]);
        assert_eq!(figure.bars().nth(3).unwrap().marker.color, "#4D4D4D");
    }

    #[test]
    fn gridlines_and_legend_title() {
        let figure = render(&[]);
        assert_eq!(figure.trace_count(), 0);
        assert_eq!(figure.layout.barmode, Some(BarMode::Group));
        assert_eq!(figure.layout.legend.as_ref().unwrap().title.text, "Housing Type");

        let yaxis = figure.layout.yaxis.as_ref().unwrap();
        assert_eq!(yaxis.dtick, Some(10.0));
        assert_eq!(yaxis.tick0, Some(0.0));
        let minor = yaxis.minor.as_ref().unwrap();
        assert_eq!(minor.dtick, 5.0);
        assert!(minor.showgrid);
    }
}
