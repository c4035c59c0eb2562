//! # Configuration
//!
//! Application settings, read from the JSON file named by
//! `DASHCHARTS_CONFIG` or defaulted. Missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::plotting::{ChartStyle, PlottersEngine};
use crate::theme::Preferences;
use crate::utils::CurrencyFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the `dark-mode` preference lives; the platform config
    /// directory when unset.
    pub preferences_path: Option<PathBuf>,
    pub live_feed: bool,
    pub feed_interval_ms: u64,
    pub chart_width: u32,
    pub chart_height: u32,
    pub currency: CurrencyFormat,
    pub style: ChartStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preferences_path: None,
            live_feed: true,
            feed_interval_ms: 2000,
            chart_width: 480,
            chart_height: 280,
            currency: CurrencyFormat::usd(),
            style: ChartStyle::default(),
        }
    }
}

impl AppConfig {
    pub const ENV_VAR: &'static str = "DASHCHARTS_CONFIG";

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn from_env() -> Result<Self> {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn feed_interval(&self) -> Duration {
        Duration::from_millis(self.feed_interval_ms.max(1))
    }

    pub fn engine(&self) -> PlottersEngine {
        PlottersEngine {
            style: self.style.clone(),
            size: (self.chart_width, self.chart_height),
        }
    }

    pub fn preferences(&self) -> Result<Preferences> {
        match self.preferences_path.clone().or_else(Preferences::default_path) {
            Some(path) => Preferences::load(path),
            None => Ok(Preferences::in_memory()),
        }
    }
}
