use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::plotting::Chart;
use crate::types::{LegendEntry, LegendScope, UpdateMode};

pub type SharedPage = Rc<RefCell<Page>>;

/// Opacity of the entry for a hidden series or segment.
pub const HIDDEN_OPACITY: f32 = 0.3;

/// What clicking a legend item does to its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendAction {
    ToggleDataset(usize),
    ToggleSegment(usize),
}

impl LegendAction {
    pub fn for_entry(scope: LegendScope, index: usize) -> Self {
        match scope {
            LegendScope::Datasets => LegendAction::ToggleDataset(index),
            LegendScope::Segments => LegendAction::ToggleSegment(index),
        }
    }

    /// Flip the target's visibility and redraw with animation.
    pub fn apply<C: Chart + ?Sized>(self, chart: &mut C) {
        match self {
            LegendAction::ToggleDataset(dataset) => {
                let visible = chart.is_dataset_visible(dataset);
                chart.set_dataset_visibility(dataset, !visible);
            }
            LegendAction::ToggleSegment(index) => chart.toggle_data_visibility(index),
        }
        chart.update(UpdateMode::Default);
    }
}

/// One rendered, clickable legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub entry: LegendEntry,
    /// Formatted aggregate shown next to the label, if enabled.
    pub value_text: Option<String>,
    pub opacity: f32,
    pub action: LegendAction,
}

/// A legend container; `list` is its inner list element, which pages may
/// omit.
#[derive(Debug, Clone, Default)]
pub struct LegendContainer {
    list: Option<Vec<LegendItem>>,
}

impl LegendContainer {
    pub fn with_list() -> Self {
        Self { list: Some(Vec::new()) }
    }

    pub fn without_list() -> Self {
        Self { list: None }
    }

    pub fn items(&self) -> Option<&[LegendItem]> {
        self.list.as_deref()
    }

    pub(crate) fn list_mut(&mut self) -> Option<&mut Vec<LegendItem>> {
        self.list.as_mut()
    }
}

/// The element ids present on a dashboard page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    canvases: BTreeSet<String>,
    containers: HashMap<String, LegendContainer>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedPage {
        Rc::new(RefCell::new(self))
    }

    pub fn with_canvas(mut self, id: impl Into<String>) -> Self {
        self.canvases.insert(id.into());
        self
    }

    pub fn with_legend(mut self, id: impl Into<String>) -> Self {
        self.containers.insert(id.into(), LegendContainer::with_list());
        self
    }

    pub fn with_container(mut self, id: impl Into<String>, container: LegendContainer) -> Self {
        self.containers.insert(id.into(), container);
        self
    }

    pub fn has_canvas(&self, id: &str) -> bool {
        self.canvases.contains(id)
    }

    pub fn container(&self, id: &str) -> Option<&LegendContainer> {
        self.containers.get(id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut LegendContainer> {
        self.containers.get_mut(id)
    }

    pub fn legend_items(&self, id: &str) -> Option<&[LegendItem]> {
        self.container(id).and_then(LegendContainer::items)
    }
}
