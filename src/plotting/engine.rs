//! The seam between the theme/legend machinery and a charting engine.
//!
//! [`ChartView`] is the read side handed to post-update hooks, so a hook can
//! never trigger another update from inside the update cycle. [`Chart`] adds
//! the mutating operations, and [`ChartEngine`] constructs chart instances.

use crate::plotting::chart::ChartConfig;
use crate::plotting::options::OptionTree;
use crate::types::{ChartKind, LegendScope, UpdateMode};
use crate::utils::Color;

/// Legend metadata as produced by the engine's label generator.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLabel {
    pub text: String,
    pub fill: Color,
    pub hidden: bool,
    /// Dataset index or data index, depending on [`ChartView::legend_scope`].
    pub index: usize,
}

/// The data point under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub dataset: usize,
    pub index: usize,
}

pub trait ChartView {
    fn kind(&self) -> ChartKind;

    fn options(&self) -> &OptionTree;

    /// Labels in dataset (or segment) insertion order.
    fn legend_labels(&self) -> Vec<LegendLabel>;

    fn is_dataset_visible(&self, dataset: usize) -> bool;

    fn is_data_visible(&self, index: usize) -> bool;

    fn dataset_values(&self, dataset: usize) -> Option<&[f64]>;

    fn legend_scope(&self) -> LegendScope {
        self.kind().legend_scope()
    }

    /// Nearest visible data point to pixel `(x, y)` of the rendered chart.
    fn hit_test(&self, _x: f64, _y: f64) -> Option<HitTarget> {
        None
    }
}

/// Runs synchronously after every chart update, including non-animated ones.
pub trait UpdateHook {
    fn after_update(&mut self, chart: &dyn ChartView);
}

impl<F> UpdateHook for F
where
    F: FnMut(&dyn ChartView),
{
    fn after_update(&mut self, chart: &dyn ChartView) {
        self(chart)
    }
}

pub trait Chart: ChartView {
    fn options_mut(&mut self) -> &mut OptionTree;

    fn set_dataset_visibility(&mut self, dataset: usize, visible: bool);

    /// Flip the visibility of one data segment across all datasets.
    fn toggle_data_visibility(&mut self, index: usize);

    /// Redraw and then run every registered [`UpdateHook`] in order.
    fn update(&mut self, mode: UpdateMode);

    fn add_update_hook(&mut self, hook: Box<dyn UpdateHook>);
}

pub trait ChartEngine {
    type Chart: Chart + 'static;

    fn construct(&self, config: ChartConfig) -> Self::Chart;
}
