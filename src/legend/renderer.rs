use crate::legend::page::{LegendAction, LegendItem, Page, SharedPage, HIDDEN_OPACITY};
use crate::plotting::{Chart, ChartView, UpdateHook};
use crate::theme::SharedChart;
use crate::types::{LegendEntry, LegendScope};
use crate::utils::ValueFormat;

/// Derive legend entries from the chart's label generator, in label order.
///
/// With `aggregate`, dataset entries carry the sum of the dataset's values
/// and segment entries carry the segment's value in the first dataset.
pub fn derive_entries(chart: &dyn ChartView, aggregate: bool) -> Vec<LegendEntry> {
    let scope = chart.legend_scope();
    chart
        .legend_labels()
        .into_iter()
        .map(|label| {
            let aggregate_value = if aggregate {
                match scope {
                    LegendScope::Datasets => chart.dataset_values(label.index).map(|v| v.iter().sum::<f64>()),
                    LegendScope::Segments => chart
                        .dataset_values(0)
                        .and_then(|v| v.get(label.index).copied()),
                }
            } else {
                None
            };
            LegendEntry {
                label: label.text,
                swatch_color: label.fill,
                visible: !label.hidden,
                series_index: label.index,
                aggregate_value,
            }
        })
        .collect()
}

/// Rebuild the legend list in container `container_id`.
///
/// A missing container, or one without an inner list, is left alone.
pub fn render_legend(
    chart: &dyn ChartView,
    page: &mut Page,
    container_id: &str,
    aggregate: Option<&ValueFormat>,
) {
    let Some(list) = page.container_mut(container_id).and_then(|c| c.list_mut()) else {
        tracing::debug!(container_id, "legend container absent, nothing rendered");
        return;
    };
    let scope = chart.legend_scope();
    list.clear();
    list.extend(
        derive_entries(chart, aggregate.is_some())
            .into_iter()
            .map(|entry| LegendItem {
                value_text: aggregate
                    .zip(entry.aggregate_value)
                    .map(|(format, value)| format.format(value)),
                opacity: if entry.visible { 1.0 } else { HIDDEN_OPACITY },
                action: LegendAction::for_entry(scope, entry.series_index),
                entry,
            }),
    );
}

/// Renders a chart's legend into a page container after every update.
pub struct LegendRenderer {
    page: SharedPage,
    container_id: String,
    aggregate: Option<ValueFormat>,
}

impl LegendRenderer {
    pub fn new(page: SharedPage, container_id: impl Into<String>) -> Self {
        Self {
            page,
            container_id: container_id.into(),
            aggregate: None,
        }
    }

    /// Show each entry's aggregate value formatted with `format`.
    pub fn with_aggregate(mut self, format: ValueFormat) -> Self {
        self.aggregate = Some(format);
        self
    }

    pub fn render(&self, chart: &dyn ChartView) {
        render_legend(
            chart,
            &mut self.page.borrow_mut(),
            &self.container_id,
            self.aggregate.as_ref(),
        );
    }
}

impl UpdateHook for LegendRenderer {
    fn after_update(&mut self, chart: &dyn ChartView) {
        self.render(chart);
    }
}

/// Click legend item `index` in `container_id`: toggle its series or
/// segment on `chart` and redraw. Returns false when there is no such item.
pub fn click<C: Chart>(page: &SharedPage, chart: &SharedChart<C>, container_id: &str, index: usize) -> bool {
    let action = page
        .borrow()
        .legend_items(container_id)
        .and_then(|items| items.get(index))
        .map(|item| item.action);
    match action {
        Some(action) => {
            action.apply(&mut *chart.borrow_mut());
            true
        }
        None => false,
    }
}
