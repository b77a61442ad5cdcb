//! # Choropleth Map
//!
//! One choropleth trace per region, in the order regions first appear among
//! the joined boundaries. Each trace paints its region's polygons in the
//! region's policy color; hovering shows the region name and its average
//! utilization. Boundaries with no resolved region are not drawn.

use geojson::{feature::Id, Feature, FeatureCollection};
use spa_core::{RegionColorMap, RegionName};
use spa_data::GeoRegion;

use crate::figure::{
    ChoroplethMarker, ChoroplethTrace, Figure, LatLon, Mapbox, Margin, ModeBar, Trace,
};
use crate::theme;

pub const MAP_STYLE: &str = "carto-positron";

/// Downtown Los Angeles.
pub const CENTER: LatLon = LatLon {
    lat: 34.0522,
    lon: -118.2437,
};

pub const ZOOM: f64 = 7.35;

pub const OPACITY: f64 = 0.75;

pub const MARGIN_PX: u32 = 5;

pub const MODEBAR_REMOVE: [&str; 10] = [
    "pan2d",
    "select2d",
    "lasso2d",
    "zoomInGeo",
    "zoomOutGeo",
    "hoverClosestGeo",
    "hoverClosestCartesian",
    "hoverCompareCartesian",
    "toggleHover",
    "toImage",
];

pub const MODEBAR_ADD: [&str; 3] = ["zoomIn2d", "zoomOut2d", "resetScale2d"];

const HOVERTEMPLATE: &str =
    "<b>%{hovertext}</b><br><br>Utilization Rate=%{customdata[0]}<extra></extra>";

struct RegionShapes<'a> {
    region: &'a RegionName,
    utilization_rate: Option<f64>,
    features: Vec<Feature>,
}

pub fn render(geo: &[GeoRegion<'_>], colors: &RegionColorMap) -> Figure {
    let mut groups: Vec<RegionShapes<'_>> = Vec::new();

    for row in geo {
        let Some(region) = row.region.as_ref() else {
            continue;
        };
        let feature = Feature {
            bbox: None,
            geometry: Some(row.geometry.clone()),
            id: Some(Id::String(row.index.to_string())),
            properties: None,
            foreign_members: None,
        };
        match groups.iter_mut().find(|g| g.region == region) {
            Some(group) => group.features.push(feature),
            None => groups.push(RegionShapes {
                region,
                utilization_rate: row.utilization_rate,
                features: vec![feature],
            }),
        }
    }

    let data = groups
        .into_iter()
        .enumerate()
        .map(|(ordinal, group)| {
            let name = group.region.as_str();
            let color = colors.color_for(name, ordinal).to_string();
            let count = group.features.len();
            let locations = group
                .features
                .iter()
                .filter_map(|f| match &f.id {
                    Some(Id::String(id)) => Some(id.clone()),
                    _ => None,
                })
                .collect();
            Trace::ChoroplethMapbox(ChoroplethTrace {
                name: name.to_string(),
                geojson: FeatureCollection {
                    bbox: None,
                    features: group.features,
                    foreign_members: None,
                },
                locations,
                z: vec![1.0; count],
                colorscale: vec![(0.0, color.clone()), (1.0, color)],
                showscale: false,
                marker: ChoroplethMarker { opacity: OPACITY },
                hovertext: vec![name.to_string(); count],
                customdata: vec![[group.utilization_rate]; count],
                hovertemplate: HOVERTEMPLATE.to_string(),
                legendgroup: name.to_string(),
                showlegend: true,
            })
        })
        .collect();

    let mut layout = theme::base_layout();
    layout.mapbox = Some(Mapbox {
        style: MAP_STYLE.to_string(),
        center: CENTER,
        zoom: ZOOM,
    });
    layout.margin = Some(Margin::uniform(MARGIN_PX));
    layout.showlegend = Some(false);
    layout.modebar = Some(ModeBar {
        remove: MODEBAR_REMOVE.iter().map(|s| s.to_string()).collect(),
        add: MODEBAR_ADD.iter().map(|s| s.to_string()).collect(),
    });

    Figure { data, layout }
}
