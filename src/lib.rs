//! # Dashboard Charts
//!
//! `dashcharts` keeps dashboard charts in step with a light/dark theme and
//! renders their legends outside the chart canvas.
//!
//! ## Features
//!
//! - Palette-driven re-theming of chart options without animation
//! - A theme store that notifies every bound chart and persists the choice
//! - External, clickable legends for series and segment charts
//! - Compact, currency and percent value formatting
//! - A widget factory that builds charts from declarative specs
//!
//! ## Example
//!
//! ```
//! use dashcharts::dashboard::{create_widget, samples};
//! use dashcharts::legend::Page;
//! use dashcharts::plotting::PlottersEngine;
//! use dashcharts::theme::ThemeStore;
//! use dashcharts::types::ThemeMode;
//!
//! let spec = samples::countries_doughnut();
//! let page = samples::sample_page(std::slice::from_ref(&spec)).shared();
//! let mut store = ThemeStore::new(ThemeMode::Light);
//!
//! let widget = create_widget(spec, &PlottersEngine::default(), &page, &mut store)
//!     .unwrap()
//!     .unwrap();
//! store.set(ThemeMode::Dark).unwrap();
//! assert_eq!(widget.binding().borrow().mode(), ThemeMode::Dark);
//! ```

pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod legend;
pub mod plotting;
pub mod theme;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::DashboardApp;
pub use config::AppConfig;
pub use error::{ChartError, Result};
pub use theme::{ChartBinding, Palette, ThemeStore};
pub use types::{PaletteEntry, ThemeMode, UpdateMode};
