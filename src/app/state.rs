use eframe::App as EApp;
use egui::TextureHandle;
use std::collections::HashMap;

use super::feed::{FeedTick, LiveFeed};
use crate::config::AppConfig;
use crate::dashboard::samples::{self, LIVE_ELEMENT_ID, LIVE_WINDOW};
use crate::dashboard::{create_widget, Widget};
use crate::error::Result;
use crate::legend::{self, SharedPage};
use crate::plotting::{Chart, PlottersChart};
use crate::theme::ThemeStore;
use crate::types::{ThemeMode, UpdateMode};

/// Latest reading shown beside the live chart.
pub struct LiveState {
    feed: LiveFeed,
    pub value: Option<f64>,
    pub deviation: Option<String>,
    pub falling: bool,
}

impl LiveState {
    fn new(feed: LiveFeed) -> Self {
        Self {
            feed,
            value: None,
            deviation: None,
            falling: false,
        }
    }

    fn record(&mut self, tick: &FeedTick) {
        self.value = Some(tick.value);
        self.deviation = tick.deviation();
        self.falling = tick.is_falling();
    }
}

/// Main application state
pub struct DashboardApp {
    pub page: SharedPage,
    pub store: ThemeStore,
    pub widgets: Vec<Widget<PlottersChart>>,
    pub live: Option<LiveState>,
    pub error_message: Option<String>,
    /// Rendered chart images keyed by element id, tagged with the chart
    /// revision they were drawn from.
    pub(crate) textures: HashMap<String, (u64, TextureHandle)>,
}

impl DashboardApp {
    /// Build the sample dashboard in the store's current theme.
    ///
    /// Starting the live feed requires a tokio runtime.
    pub fn new(config: &AppConfig, mut store: ThemeStore) -> Result<Self> {
        let specs = samples::dashboard_widgets(&config.currency);
        let page = samples::sample_page(&specs).shared();
        let engine = config.engine();

        let mut widgets = Vec::with_capacity(specs.len());
        for spec in specs {
            if let Some(widget) = create_widget(spec, &engine, &page, &mut store)? {
                widgets.push(widget);
            }
        }

        let live = (config.live_feed && widgets.iter().any(|w| w.element_id == LIVE_ELEMENT_ID)).then(|| {
            LiveState::new(LiveFeed::spawn(samples::live_series(), LIVE_WINDOW, config.feed_interval()))
        });

        tracing::info!(widgets = widgets.len(), mode = ?store.current(), "dashboard ready");
        Ok(Self {
            page,
            store,
            widgets,
            live,
            error_message: None,
            textures: HashMap::new(),
        })
    }

    pub fn is_dark(&self) -> bool {
        self.store.current().is_dark()
    }

    /// Switch the theme; a failure to persist the choice is reported but
    /// the charts are already re-themed.
    pub fn set_dark_mode(&mut self, dark: bool) {
        let mode = if dark { ThemeMode::Dark } else { ThemeMode::Light };
        match self.store.set(mode) {
            Ok(_) => self.error_message = None,
            Err(e) => {
                tracing::warn!(error = %e, "could not save theme preference");
                self.error_message = Some(format!("Could not save theme preference: {e}"));
            }
        }
    }

    pub fn widget(&self, element_id: &str) -> Option<&Widget<PlottersChart>> {
        self.widgets.iter().find(|w| w.element_id == element_id)
    }

    /// Activate the `item`th legend entry of the `widget`th widget.
    pub fn click_legend(&mut self, widget: usize, item: usize) -> bool {
        let Some(widget) = self.widgets.get(widget) else {
            return false;
        };
        let Some(container) = widget.legend_container.as_deref() else {
            return false;
        };
        legend::click(&self.page, &widget.chart(), container, item)
    }

    /// Append every pending feed tick to the live chart. Returns whether
    /// anything changed.
    pub fn poll_feed(&mut self) -> bool {
        let Some(live) = self.live.as_mut() else {
            return false;
        };
        let Some(widget) = self.widgets.iter().find(|w| w.element_id == LIVE_ELEMENT_ID) else {
            return false;
        };

        let chart = widget.chart();
        let mut changed = false;
        while let Some(tick) = live.feed.try_next() {
            {
                let mut chart = chart.borrow_mut();
                chart.push_point(tick.label.clone(), tick.value);
                chart.update(UpdateMode::None);
            }
            live.record(&tick);
            changed = true;
        }
        changed
    }
}

impl EApp for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::draw_ui(self, ctx);
    }
}
