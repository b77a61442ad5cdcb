//! # Reactive Controller
//!
//! [`Dashboard::update`] is the whole reactive pipeline as one pure function:
//! resolve the selection, aggregate the immutable dataset, render the four
//! figures and hand back the normalized control value. It holds no mutable
//! state, so concurrent callers can share one `Dashboard` behind an `Arc`.

use serde::Serialize;
use spa_core::{EmptySelectionPolicy, RegionColorMap, RegionName, Selection};
use spa_data::{aggregate::aggregate, Dataset};

use crate::figure::Figure;
use crate::{bed_count_bar, housing_bar, map, region_bar};

/// Loaded data plus the fixed rendering policies.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    colors: RegionColorMap,
    empty_selection: EmptySelectionPolicy,
}

/// The five outputs of one update, in the order the page consumes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardUpdate {
    pub map: Figure,
    pub region_bar: Figure,
    pub housing_type_bar: Figure,
    pub bed_count_bar: Figure,
    /// Normalized control value: the sentinel expanded to explicit names.
    pub selection: Selection,
}

impl DashboardUpdate {
    /// Positional form: map, region bar, housing type bar, bed count bar,
    /// normalized selection.
    pub fn into_outputs(self) -> (Figure, Figure, Figure, Figure, Selection) {
        (
            self.map,
            self.region_bar,
            self.housing_type_bar,
            self.bed_count_bar,
            self.selection,
        )
    }
}

impl Dashboard {
    pub fn new(dataset: Dataset, colors: RegionColorMap) -> Self {
        Self {
            dataset,
            colors,
            empty_selection: EmptySelectionPolicy::default(),
        }
    }

    /// Override what an empty selection means.
    pub fn with_empty_selection(mut self, policy: EmptySelectionPolicy) -> Self {
        self.empty_selection = policy;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn colors(&self) -> &RegionColorMap {
        &self.colors
    }

    pub fn empty_selection(&self) -> EmptySelectionPolicy {
        self.empty_selection
    }

    pub fn known_regions(&self) -> &[RegionName] {
        self.dataset.known_regions()
    }

    /// Run the full filter, aggregate, render pipeline for `selection`.
    pub fn update(&self, selection: &Selection) -> DashboardUpdate {
        let resolved = selection.resolve(self.dataset.known_regions(), self.empty_selection);
        let views = aggregate(&self.dataset, &resolved.filter);

        tracing::debug!(
            requested = selection.values().len(),
            regions = views.region_averages.len(),
            boundaries = views.geo.len(),
            "dashboard update"
        );

        DashboardUpdate {
            map: map::render(&views.geo, &self.colors),
            region_bar: region_bar::render(&views.region_averages, &self.colors),
            housing_type_bar: housing_bar::render(&views.housing_types),
            bed_count_bar: bed_count_bar::render(&views.bed_count_rows()),
            selection: resolved.normalized,
        }
    }
}
