use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

use super::*;
use crate::plotting::{paths, Chart, ChartConfig, ChartStyle, ChartView, Dataset, PlottersChart};
use crate::types::{ChartKind, PaletteEntry, ThemeMode, UpdateMode};
use crate::utils::Color;

fn bar_chart() -> SharedChart<PlottersChart> {
    let config = ChartConfig::new(
        ChartKind::Bar,
        vec!["12-01-2022".to_string(), "01-01-2023".to_string()],
        vec![
            Dataset::series("Direct", vec![800.0, 1600.0], Color::hex("#67BFFF").unwrap()),
            Dataset::series("Indirect", vec![4900.0, 2600.0], Color::hex("#8470FF").unwrap()),
        ],
    );
    Rc::new(RefCell::new(PlottersChart::new(config, ChartStyle::default(), (320, 200))))
}

fn tick_palette() -> Palette {
    Palette::new().with(
        paths::Y_TICK_COLOR,
        PaletteEntry::new(Color::hex("#9CA3AF").unwrap(), Color::hex("#6B7280").unwrap()),
    )
}

fn themed_fields(chart: &SharedChart<PlottersChart>, palette: &Palette) -> Vec<(String, Option<String>)> {
    let chart = chart.borrow();
    palette
        .iter()
        .map(|(path, _)| (path.to_string(), chart.options().get_str(path).map(str::to_string)))
        .collect()
}

#[test]
fn test_apply_writes_selected_colors() {
    let chart = bar_chart();
    let palette = Palette::cartesian();
    let mut binding = ChartBinding::new(Rc::clone(&chart), palette.clone(), ThemeMode::Light).unwrap();

    for mode in [ThemeMode::Dark, ThemeMode::Light] {
        binding.apply(mode);
        assert_eq!(binding.mode(), mode);
        let chart = chart.borrow();
        for (path, entry) in palette.iter() {
            assert_eq!(chart.options().get_color(path), Some(entry.pick(mode)), "{path}");
        }
    }
}

#[test]
fn test_tick_color_follows_dark_mode() {
    let chart = bar_chart();
    let mut binding = ChartBinding::new(Rc::clone(&chart), tick_palette(), ThemeMode::Light).unwrap();
    assert_eq!(chart.borrow().options().get_str(paths::Y_TICK_COLOR), Some("#9CA3AF"));

    binding.apply(ThemeMode::Dark);
    assert_eq!(chart.borrow().options().get_str(paths::Y_TICK_COLOR), Some("#6B7280"));
}

#[test]
fn test_apply_is_idempotent() {
    let chart = bar_chart();
    let palette = Palette::cartesian();
    let mut binding = ChartBinding::new(Rc::clone(&chart), palette.clone(), ThemeMode::Light).unwrap();

    binding.apply(ThemeMode::Dark);
    let once = chart.borrow().options().clone();
    binding.apply(ThemeMode::Dark);
    assert_eq!(chart.borrow().options(), &once);
}

#[test]
fn test_dark_then_light_restores_original_options() {
    let chart = bar_chart();
    let palette = Palette::cartesian().with_background();
    let mut binding = ChartBinding::new(Rc::clone(&chart), palette, ThemeMode::Light).unwrap();
    let original = chart.borrow().options().clone();

    binding.apply(ThemeMode::Dark);
    assert_ne!(chart.borrow().options(), &original);
    binding.apply(ThemeMode::Light);
    assert_eq!(chart.borrow().options(), &original);
}

#[test]
fn test_apply_redraws_without_animation() {
    let chart = bar_chart();
    let mut binding = ChartBinding::new(Rc::clone(&chart), tick_palette(), ThemeMode::Light).unwrap();
    let before = chart.borrow().revision();

    binding.apply(ThemeMode::Dark);
    let chart = chart.borrow();
    assert_eq!(chart.revision(), before + 1);
    assert_eq!(chart.last_update(), Some(UpdateMode::None));
}

#[test]
fn test_unthemed_options_are_untouched() {
    let chart = bar_chart();
    let mut binding = ChartBinding::new(Rc::clone(&chart), Palette::tooltip(), ThemeMode::Light).unwrap();
    binding.apply(ThemeMode::Dark);

    let chart = chart.borrow();
    assert_eq!(chart.options().get(paths::X_TICK_COLOR), None);
    assert_eq!(chart.options().get("animation.duration"), Some(&json!(200)));
}

#[test]
fn test_construction_rejects_scalar_parent() {
    let chart = bar_chart();
    chart
        .borrow_mut()
        .options_mut()
        .insert("cutout", json!("80%"))
        .unwrap();
    let palette = Palette::new().with(
        "cutout.color",
        PaletteEntry::new(Color::WHITE, Color::hex("#1F2937").unwrap()),
    );
    assert!(ChartBinding::new(chart, palette, ThemeMode::Light).is_err());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "no option at")]
fn test_missing_option_fails_fast_in_debug_builds() {
    let chart = bar_chart();
    let mut binding = ChartBinding::new(Rc::clone(&chart), Palette::tooltip(), ThemeMode::Light).unwrap();
    chart
        .borrow_mut()
        .options_mut()
        .replace("plugins.tooltip", json!(null))
        .unwrap();
    binding.apply(ThemeMode::Dark);
}

#[cfg(not(debug_assertions))]
#[test]
#[tracing_test::traced_test]
fn test_missing_option_is_skipped_in_release_builds() {
    let chart = bar_chart();
    let mut binding = ChartBinding::new(Rc::clone(&chart), Palette::cartesian(), ThemeMode::Light).unwrap();
    chart
        .borrow_mut()
        .options_mut()
        .replace("plugins.tooltip", json!(null))
        .unwrap();

    binding.apply(ThemeMode::Dark);
    assert!(logs_contain("skipping themed option"));
    assert_eq!(binding.mode(), ThemeMode::Dark);
    let chart = chart.borrow();
    assert_eq!(chart.options().get_str(paths::Y_TICK_COLOR), Some("#6B7280"));
    assert_eq!(chart.options().get_str(paths::X_TICK_COLOR), Some("#6B7280"));
    assert_eq!(chart.last_update(), Some(UpdateMode::None));
}

#[test]
fn test_store_notifies_in_registration_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = ThemeStore::new(ThemeMode::Light);
    for name in ["first", "second", "third"] {
        let seen = Rc::clone(&seen);
        store.subscribe(move |mode| seen.borrow_mut().push((name, mode)));
    }

    assert!(store.set(ThemeMode::Dark).unwrap());
    assert_eq!(
        *seen.borrow(),
        vec![
            ("first", ThemeMode::Dark),
            ("second", ThemeMode::Dark),
            ("third", ThemeMode::Dark),
        ]
    );
}

#[test]
fn test_store_skips_unchanged_mode_and_unsubscribed_listeners() {
    let calls = Rc::new(RefCell::new(0));
    let mut store = ThemeStore::new(ThemeMode::Dark);
    let id = {
        let calls = Rc::clone(&calls);
        store.subscribe(move |_| *calls.borrow_mut() += 1)
    };

    assert!(!store.set(ThemeMode::Dark).unwrap());
    assert_eq!(*calls.borrow(), 0);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.toggle().unwrap();
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(store.current(), ThemeMode::Light);
}

#[test]
fn test_store_drives_bindings() {
    let chart = bar_chart();
    let mut store = ThemeStore::new(ThemeMode::Light);
    let binding = Rc::new(RefCell::new(
        ChartBinding::new(Rc::clone(&chart), tick_palette(), store.current()).unwrap(),
    ));
    ChartBinding::subscribe(&binding, &mut store);

    store.dispatch(&ThemeEvent { mode: "on".to_string() }).unwrap();
    assert_eq!(binding.borrow().mode(), ThemeMode::Dark);
    assert_eq!(chart.borrow().options().get_str(paths::Y_TICK_COLOR), Some("#6B7280"));

    store.dispatch(&ThemeEvent::for_mode(ThemeMode::Light)).unwrap();
    assert_eq!(chart.borrow().options().get_str(paths::Y_TICK_COLOR), Some("#9CA3AF"));
}

#[test]
fn test_theme_event_payload() {
    let event: ThemeEvent = serde_json::from_str(r#"{"mode":"on"}"#).unwrap();
    assert_eq!(event.theme_mode(), ThemeMode::Dark);
    assert_eq!(ThemeEvent { mode: "off".to_string() }.theme_mode(), ThemeMode::Light);
    assert_eq!(ThemeEvent::for_mode(ThemeMode::Dark).mode, "on");
}

#[test]
fn test_preference_persists_across_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let mut store = ThemeStore::from_preferences(Preferences::load(&path).unwrap());
    assert_eq!(store.current(), ThemeMode::Light);
    store.set(ThemeMode::Dark).unwrap();

    let reloaded = Preferences::load(&path).unwrap();
    assert_eq!(reloaded.get(DARK_MODE_KEY), Some("true"));
    assert_eq!(ThemeStore::from_preferences(reloaded).current(), ThemeMode::Dark);
}

#[test]
fn test_preference_flag_values() {
    assert_eq!(ThemeMode::from_preference(Some("true")), ThemeMode::Dark);
    assert_eq!(ThemeMode::from_preference(Some("false")), ThemeMode::Light);
    assert_eq!(ThemeMode::from_preference(Some("yes")), ThemeMode::Light);
    assert_eq!(ThemeMode::from_preference(None), ThemeMode::Light);
}

#[test]
fn test_palette_round_trips_through_json() {
    let palette = Palette::radial();
    let raw = serde_json::to_string(&palette).unwrap();
    let parsed: Palette = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, palette);
    assert_eq!(
        parsed.get(paths::R_GRID_COLOR).map(|e| e.dark),
        Some(Color::rgba(0x37, 0x41, 0x51, 0.6))
    );
}
