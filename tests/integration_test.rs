use dashcharts::app::DashboardApp;
use dashcharts::dashboard::samples::{self, LIVE_ELEMENT_ID, LIVE_WINDOW};
use dashcharts::legend::{render_legend, Page};
use dashcharts::plotting::{paths, ChartConfig, ChartStyle, ChartView, Dataset, PlottersChart};
use dashcharts::theme::{ChartBinding, Palette, Preferences, ThemeStore, DARK_MODE_KEY};
use dashcharts::types::{ChartKind, PaletteEntry, ThemeMode};
use dashcharts::utils::Color;
use dashcharts::AppConfig;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

fn color(hex: &str) -> Color {
    Color::hex(hex).unwrap()
}

fn test_config(dir: &TempDir, live_feed: bool) -> AppConfig {
    AppConfig {
        preferences_path: Some(dir.path().join("preferences.json")),
        live_feed,
        feed_interval_ms: 5,
        chart_width: 160,
        chart_height: 100,
        ..AppConfig::default()
    }
}

#[test]
fn test_theme_then_legend_end_to_end() {
    let config = ChartConfig::new(
        ChartKind::Line,
        vec!["Jan".to_string(), "Feb".to_string()],
        vec![
            Dataset::series("Direct", vec![1.0, 2.0], color("#67BFFF")),
            Dataset::series("Referral", vec![3.0, 4.0], color("#8470FF")),
        ],
    );
    let chart = Rc::new(RefCell::new(PlottersChart::new(config, ChartStyle::default(), (160, 100))));
    let palette = Palette::new().with(
        paths::Y_TICK_COLOR,
        PaletteEntry::new(color("#9CA3AF"), color("#6B7280")),
    );

    let mut binding = ChartBinding::new(Rc::clone(&chart), palette, ThemeMode::Light).unwrap();
    assert_eq!(chart.borrow().options().get_str(paths::Y_TICK_COLOR), Some("#9CA3AF"));

    binding.apply(ThemeMode::Dark);
    assert_eq!(chart.borrow().options().get_str(paths::Y_TICK_COLOR), Some("#6B7280"));

    let mut page = Page::new().with_legend("legend-x");
    render_legend(&*chart.borrow(), &mut page, "legend-x", None);
    let items = page.legend_items("legend-x").unwrap();
    let entries: Vec<_> = items
        .iter()
        .map(|item| (item.entry.label.as_str(), item.entry.swatch_color))
        .collect();
    assert_eq!(entries, vec![("Direct", color("#67BFFF")), ("Referral", color("#8470FF"))]);
}

#[test]
fn test_dashboard_follows_saved_preference() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, false);
    let mut preferences = config.preferences().unwrap();
    preferences.set(DARK_MODE_KEY, "true").unwrap();

    let store = ThemeStore::from_preferences(config.preferences().unwrap());
    let app = DashboardApp::new(&config, store).unwrap();
    assert!(app.is_dark());
    assert_eq!(app.widgets.len(), 9);
    assert!(app.live.is_none());

    let chart = app.widget("dashboard-card-04").unwrap().chart();
    assert_eq!(chart.borrow().options().get_str(paths::BACKGROUND), Some("#1F2937"));
}

#[test]
fn test_toggle_persists_and_rethemes() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, false);
    let mut app = DashboardApp::new(&config, ThemeStore::from_preferences(config.preferences().unwrap())).unwrap();
    assert!(!app.is_dark());

    app.set_dark_mode(true);
    assert!(app.error_message.is_none());
    for widget in &app.widgets {
        assert_eq!(widget.binding().borrow().mode(), ThemeMode::Dark);
    }

    let reloaded = Preferences::load(dir.path().join("preferences.json")).unwrap();
    assert_eq!(reloaded.get(DARK_MODE_KEY), Some("true"));
}

#[test]
fn test_legend_click_hides_segment() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, false);
    let mut app = DashboardApp::new(&config, ThemeStore::new(ThemeMode::Light)).unwrap();
    let index = app
        .widgets
        .iter()
        .position(|w| w.element_id == "dashboard-card-06")
        .unwrap();

    assert!(app.click_legend(index, 1));
    let chart = app.widgets[index].chart();
    assert!(!chart.borrow().is_data_visible(1));

    let page = app.page.borrow();
    let items = page.legend_items("dashboard-card-06-legend").unwrap();
    assert_eq!(items.len(), 3);
    assert!(!items[1].entry.visible);
    assert!(items[0].entry.visible);
}

#[tokio::test]
async fn test_live_feed_shifts_window() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, true);
    let mut app = DashboardApp::new(&config, ThemeStore::new(ThemeMode::Light)).unwrap();
    assert!(app.live.is_some());

    let mut waited = Duration::ZERO;
    while !app.poll_feed() && waited < Duration::from_secs(2) {
        tokio::time::sleep(Duration::from_millis(5)).await;
        waited += Duration::from_millis(5);
    }

    let chart = app.widget(LIVE_ELEMENT_ID).unwrap().chart();
    let chart = chart.borrow();
    let values = chart.dataset_values(0).unwrap();
    assert_eq!(values.len(), LIVE_WINDOW);
    assert_eq!(values.last().copied(), app.live.as_ref().unwrap().value);
    assert_ne!(values[0], samples::live_series()[0]);
}
