//! # Regional Average Bar Chart
//!
//! One bar per region, colored by the region color policy, labeled with the
//! value to one decimal place above the bar. The y-axis is pinned to
//! `[60, 105]` so small differences between regions stay visible.

use spa_core::RegionColorMap;
use spa_data::RegionAverage;

use crate::figure::{Axis, AxisTitle, BarMarker, BarMode, BarTrace, Figure, Title, Trace};
use crate::theme::{self, REGION_AXIS_LABEL, UTILIZATION_AXIS_LABEL};

pub const TITLE: &str = "Average Bed Utilization Rate by SPA";

/// Fixed y-axis range.
pub const Y_RANGE: [f64; 2] = [60.0, 105.0];

/// One bar per entry of `averages`, drawn from the region-average view
/// rather than the boundary join. A region with a boundary but no bed
/// records therefore gets no x-axis category here, while a region with
/// records but no boundary still gets a bar.
pub fn render(averages: &[RegionAverage], colors: &RegionColorMap) -> Figure {
    let data = averages
        .iter()
        .enumerate()
        .map(|(ordinal, average)| {
            let name = average.region.as_str();
            Trace::Bar(BarTrace {
                name: name.to_string(),
                x: vec![name.to_string()],
                y: vec![average.utilization_rate],
                text: Some(vec![average.utilization_rate]),
                texttemplate: Some("%{text:.1f}".to_string()),
                textposition: Some("outside".to_string()),
                marker: BarMarker {
                    color: colors.color_for(name, ordinal).to_string(),
                },
                offsetgroup: name.to_string(),
                legendgroup: name.to_string(),
                showlegend: true,
                hovertemplate: theme::bar_hovertemplate(None, UTILIZATION_AXIS_LABEL),
            })
        })
        .collect();

    let mut layout = theme::base_layout();
    layout.title = Some(Title::new(TITLE));
    layout.barmode = Some(BarMode::Relative);
    layout.showlegend = Some(false);
    layout.xaxis = Some(Axis {
        title: Some(AxisTitle::new(REGION_AXIS_LABEL)),
        ..Axis::default()
    });
    layout.yaxis = Some(Axis {
        title: Some(AxisTitle::new(UTILIZATION_AXIS_LABEL)),
        range: Some(Y_RANGE),
        ..Axis::default()
    });

    Figure { data, layout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spa_core::RegionName;

    fn average(region: &str, rate: Option<f64>) -> RegionAverage {
        RegionAverage {
            region: RegionName::new(region),
            utilization_rate: rate,
        }
    }

    #[test]
    fn one_bar_per_region_with_mapped_colors() {
        let figure = render(
            &[average("Antelope Valley", Some(91.25)), average("West Los Angeles", Some(77.0))],
            &RegionColorMap::los_angeles(),
        );
        let bars: Vec<_> = figure.bars().collect();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].x, vec!["Antelope Valley"]);
        assert_eq!(bars[0].y, vec![Some(91.25)]);
        assert_eq!(bars[0].text, Some(vec![Some(91.25)]));
        assert_eq!(bars[0].marker.color, "#636EFA");
        assert_eq!(bars[1].marker.color, "#FFA15A");
    }

    #[test]
    fn labels_one_decimal_outside() {
        let figure = render(&[average("A", Some(85.0))], &RegionColorMap::default());
        let bar = figure.bars().next().unwrap();
        assert_eq!(bar.texttemplate.as_deref(), Some("%{text:.1f}"));
        assert_eq!(bar.textposition.as_deref(), Some("outside"));
    }

    #[test]
    fn fixed_axis_and_hidden_legend() {
        let figure = render(&[], &RegionColorMap::los_angeles());
        assert_eq!(figure.trace_count(), 0);
        assert_eq!(figure.layout.yaxis.as_ref().unwrap().range, Some([60.0, 105.0]));
        assert_eq!(figure.layout.showlegend, Some(false));
        assert_eq!(figure.layout.title.as_ref().unwrap().text, TITLE);
        assert_eq!(figure.layout.paper_bgcolor.as_deref(), Some(theme::BACKGROUND));
    }

    #[test]
    fn missing_average_renders_null_bar() {
        let figure = render(&[average("C", None)], &RegionColorMap::default());
        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"][0]["y"], serde_json::json!([null]));
    }
}
