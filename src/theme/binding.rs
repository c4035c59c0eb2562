use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::Result;
use crate::plotting::Chart;
use crate::theme::store::{SubscriptionId, ThemeStore};
use crate::types::{PaletteEntry, ThemeMode, UpdateMode};

/// A chart instance shared between its binding, the page and the UI.
pub type SharedChart<C> = Rc<RefCell<C>>;

/// Option path -> `{light, dark}` colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: BTreeMap<String, PaletteEntry>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, entry: PaletteEntry) -> Self {
        self.entries.insert(path.into(), entry);
        self
    }

    pub fn get(&self, path: &str) -> Option<&PaletteEntry> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PaletteEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `other` into `self`; entries of `other` win.
    pub fn merged(mut self, other: Palette) -> Self {
        self.entries.extend(other.entries);
        self
    }
}

/// Keeps one chart's themed option fields in sync with the theme mode.
///
/// Option fields without a palette entry are left at whatever the chart
/// was configured with.
pub struct ChartBinding<C: Chart> {
    chart: SharedChart<C>,
    palette: Palette,
    mode: ThemeMode,
}

impl<C: Chart> ChartBinding<C> {
    /// Write the `mode` colors of every palette entry into the chart's
    /// option tree, creating the fields where needed.
    pub fn new(chart: SharedChart<C>, palette: Palette, mode: ThemeMode) -> Result<Self> {
        {
            let mut target = chart.borrow_mut();
            let options = target.options_mut();
            for (path, entry) in palette.iter() {
                options.insert(path, color_value(entry, mode))?;
            }
        }
        Ok(Self { chart, palette, mode })
    }

    /// Switch every themed field to `mode` and redraw without animation.
    pub fn apply(&mut self, mode: ThemeMode) {
        {
            let mut chart = self.chart.borrow_mut();
            let options = chart.options_mut();
            for (path, entry) in self.palette.iter() {
                if let Err(err) = options.replace(path, color_value(entry, mode)) {
                    if cfg!(debug_assertions) {
                        panic!("{err}");
                    }
                    tracing::warn!(%err, "skipping themed option");
                }
            }
        }
        self.mode = mode;
        self.chart.borrow_mut().update(UpdateMode::None);
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn chart(&self) -> &SharedChart<C> {
        &self.chart
    }
}

impl<C: Chart + 'static> ChartBinding<C> {
    /// Register `binding` with `store` so every theme change reaches it.
    pub fn subscribe(binding: &Rc<RefCell<Self>>, store: &mut ThemeStore) -> SubscriptionId {
        let binding = Rc::clone(binding);
        store.subscribe(move |mode| binding.borrow_mut().apply(mode))
    }
}

fn color_value(entry: &PaletteEntry, mode: ThemeMode) -> Value {
    Value::String(entry.pick(mode).to_string())
}
