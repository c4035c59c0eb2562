use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::legend::{LegendRenderer, SharedPage};
use crate::plotting::{Chart, ChartConfig, ChartEngine};
use crate::theme::{ChartBinding, Palette, SharedChart, SubscriptionId, ThemeStore};
use crate::types::UpdateMode;
use crate::utils::ValueFormat;

/// Where and how a widget renders its external legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSpec {
    pub container_id: String,
    /// Show each entry's total, formatted with this rule.
    #[serde(default)]
    pub aggregate: Option<ValueFormat>,
}

/// Everything that distinguishes one dashboard widget from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub element_id: String,
    pub config: ChartConfig,
    pub palette: Palette,
    #[serde(default)]
    pub legend: Option<LegendSpec>,
}

/// A constructed, theme-bound chart widget.
pub struct Widget<C: Chart> {
    pub element_id: String,
    pub legend_container: Option<String>,
    binding: Rc<RefCell<ChartBinding<C>>>,
    subscription: SubscriptionId,
}

impl<C: Chart> Widget<C> {
    pub fn chart(&self) -> SharedChart<C> {
        Rc::clone(self.binding.borrow().chart())
    }

    pub fn binding(&self) -> &Rc<RefCell<ChartBinding<C>>> {
        &self.binding
    }

    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}

/// Build the widget described by `spec` if its element is on the page.
///
/// The chart is constructed in the store's current theme, its legend hook
/// is registered, and the binding is subscribed to `store`. An absent
/// element yields `Ok(None)`.
pub fn create_widget<E: ChartEngine>(
    spec: WidgetSpec,
    engine: &E,
    page: &SharedPage,
    store: &mut ThemeStore,
) -> Result<Option<Widget<E::Chart>>> {
    if !page.borrow().has_canvas(&spec.element_id) {
        tracing::debug!(element_id = %spec.element_id, "chart element not present, widget skipped");
        return Ok(None);
    }

    let mut chart = engine.construct(spec.config);
    if let Some(legend) = &spec.legend {
        let mut renderer = LegendRenderer::new(Rc::clone(page), legend.container_id.clone());
        if let Some(format) = legend.aggregate.clone() {
            renderer = renderer.with_aggregate(format);
        }
        chart.add_update_hook(Box::new(renderer));
    }

    let chart = Rc::new(RefCell::new(chart));
    let binding = Rc::new(RefCell::new(ChartBinding::new(
        Rc::clone(&chart),
        spec.palette,
        store.current(),
    )?));
    chart.borrow_mut().update(UpdateMode::Default);
    let subscription = ChartBinding::subscribe(&binding, store);

    tracing::debug!(element_id = %spec.element_id, mode = ?store.current(), "widget created");
    Ok(Some(Widget {
        element_id: spec.element_id,
        legend_container: spec.legend.map(|l| l.container_id),
        binding,
        subscription,
    }))
}
