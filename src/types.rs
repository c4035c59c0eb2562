//! # Common Types
//!
//! Value types shared by the theme binding, the chart engine seam and the
//! legend renderer.

use serde::{Deserialize, Serialize};

use crate::utils::Color;

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Decode the persisted `dark-mode` flag: `"true"` is dark, anything
    /// else (including an absent value) is light.
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("true") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn as_preference(self) -> &'static str {
        match self {
            ThemeMode::Light => "false",
            ThemeMode::Dark => "true",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// A `{light, dark}` color pair for one themed property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub light: Color,
    pub dark: Color,
}

impl PaletteEntry {
    pub fn new(light: Color, dark: Color) -> Self {
        Self { light, dark }
    }

    /// The color selected by `mode`.
    pub fn pick(&self, mode: ThemeMode) -> Color {
        match mode {
            ThemeMode::Light => self.light,
            ThemeMode::Dark => self.dark,
        }
    }
}

/// How a chart redraw should transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Animated transition using the chart's configured duration.
    Default,
    /// Instantaneous redraw.
    None,
}

/// The chart types the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
    PolarArea,
    Pie,
}

impl ChartKind {
    /// What one legend entry stands for on this kind of chart.
    pub fn legend_scope(self) -> LegendScope {
        match self {
            ChartKind::Line | ChartKind::Bar => LegendScope::Datasets,
            ChartKind::Doughnut | ChartKind::PolarArea | ChartKind::Pie => LegendScope::Segments,
        }
    }

    pub fn is_cartesian(self) -> bool {
        matches!(self, ChartKind::Line | ChartKind::Bar)
    }
}

/// Whether legend entries map to whole datasets or to data segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendScope {
    Datasets,
    Segments,
}

/// One legend entry, derived from the chart's live state on every redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub swatch_color: Color,
    pub visible: bool,
    /// Dataset index for dataset legends, data index for segment legends.
    pub series_index: usize,
    pub aggregate_value: Option<f64>,
}
