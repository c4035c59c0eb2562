//! Sample dashboard
//!
//! Seven theme-aware charts with external legends and a live price feed.

use anyhow::Context as _;
use eframe::egui;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use dashcharts::{AppConfig, DashboardApp, ThemeStore};

const DEFAULT_FILTER: &str = if cfg!(feature = "dev") {
    "dashcharts=debug"
} else {
    "dashcharts=info"
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .init();

    let config = AppConfig::from_env().context("reading configuration")?;
    let preferences = config.preferences().context("reading theme preference")?;

    // The live feed runs on this runtime while eframe owns the main thread.
    let rt = Runtime::new().context("starting tokio runtime")?;
    rt.block_on(async {
        let app = DashboardApp::new(&config, ThemeStore::from_preferences(preferences))?;

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title("Dashboard"),
            ..Default::default()
        };

        eframe::run_native(
            "Dashboard",
            options,
            Box::new(|cc| {
                cc.egui_ctx.set_fonts(egui::FontDefinitions::default());
                Ok(Box::new(app) as Box<dyn eframe::App>)
            }),
        )
        .map_err(|e| anyhow::anyhow!("running application: {e}"))
    })
}
