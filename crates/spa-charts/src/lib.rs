//! # spa-charts — Figures and the Reactive Controller
//!
//! Turns the aggregated views from `spa-data` into figure descriptions that
//! plotly.js renders as-is (`{"data": [...], "layout": {...}}`), and wires
//! the whole pipeline into one pure function, [`Dashboard::update`].
//!
//! | Module | Figure |
//! |--------|--------|
//! | [`map`] | choropleth of SPA boundaries colored by region |
//! | [`region_bar`] | average utilization per region |
//! | [`housing_bar`] | average utilization per housing type per region |
//! | [`bed_count_bar`] | utilized vs. empty beds per region |
//!
//! Every renderer is total: an empty view yields a figure with no traces.

pub mod bed_count_bar;
pub mod controller;
pub mod figure;
pub mod housing_bar;
pub mod map;
pub mod region_bar;
pub mod theme;

pub use controller::{Dashboard, DashboardUpdate};
pub use figure::{Figure, Trace};
