//! # Figure Description Model
//!
//! A typed subset of the plotly.js figure schema: only the trace kinds and
//! layout attributes the dashboard sets. Unset attributes are omitted from
//! the serialized JSON so plotly applies its own defaults.

use geojson::FeatureCollection;
use serde::Serialize;

/// A complete renderable figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Number of traces.
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// Bar traces, in draw order.
    pub fn bars(&self) -> impl Iterator<Item = &BarTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::Bar(bar) => Some(bar),
            Trace::ChoroplethMapbox(_) => None,
        })
    }

    /// Choropleth traces, in draw order.
    pub fn choropleths(&self) -> impl Iterator<Item = &ChoroplethTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::ChoroplethMapbox(c) => Some(c),
            Trace::Bar(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Trace {
    #[serde(rename = "bar")]
    Bar(BarTrace),
    #[serde(rename = "choroplethmapbox")]
    ChoroplethMapbox(ChoroplethTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texttemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    pub marker: BarMarker,
    pub offsetgroup: String,
    pub legendgroup: String,
    pub showlegend: bool,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarMarker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    pub name: String,
    pub geojson: FeatureCollection,
    /// Feature ids, matched against each feature's `id`.
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    /// Single-color scale: `[[0, color], [1, color]]`.
    pub colorscale: Vec<(f64, String)>,
    pub showscale: bool,
    pub marker: ChoroplethMarker,
    pub hovertext: Vec<String>,
    pub customdata: Vec<[Option<f64>; 1]>,
    pub hovertemplate: String,
    pub legendgroup: String,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethMarker {
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<BarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modebar: Option<ModeBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickMode {
    Linear,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<TickMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick0: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<MinorTicks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automargin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zerolinewidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zerolinecolor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standoff: Option<u32>,
}

impl AxisTitle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            standoff: None,
        }
    }
}

/// Unlabeled minor ticks and gridlines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinorTicks {
    pub tickmode: TickMode,
    pub tick0: f64,
    pub dtick: f64,
    pub showgrid: bool,
    pub gridwidth: f64,
    pub gridcolor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub r: u32,
    pub t: u32,
    pub l: u32,
    pub b: u32,
}

impl Margin {
    pub fn uniform(px: u32) -> Self {
        Self {
            r: px,
            t: px,
            l: px,
            b: px,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub center: LatLon,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Mode bar buttons to drop and to add.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeBar {
    pub remove: Vec<String>,
    pub add: Vec<String>,
}
