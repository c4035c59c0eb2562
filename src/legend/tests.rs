use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::plotting::{Chart, ChartConfig, ChartStyle, ChartView, Dataset, PlottersChart};
use crate::theme::{ChartBinding, Palette, SharedChart};
use crate::types::{ChartKind, ThemeMode, UpdateMode};
use crate::utils::{Color, CurrencyFormat, ValueFormat};

fn color(hex: &str) -> Color {
    Color::hex(hex).unwrap()
}

fn traffic_chart() -> PlottersChart {
    let config = ChartConfig::new(
        ChartKind::Bar,
        ["12-01-2022", "01-01-2023", "02-01-2023", "03-01-2023", "04-01-2023", "05-01-2023"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        vec![
            Dataset::series("Direct", vec![800.0, 1600.0, 900.0, 1300.0, 1950.0, 1700.0], color("#67BFFF")),
            Dataset::series("Referral", vec![4900.0, 2600.0, 5350.0, 4800.0, 5200.0, 4800.0], color("#8470FF")),
        ],
    );
    PlottersChart::new(config, ChartStyle::default(), (320, 200))
}

fn countries_chart() -> PlottersChart {
    let config = ChartConfig::new(
        ChartKind::Doughnut,
        vec!["United States".to_string(), "Italy".to_string(), "Other".to_string()],
        vec![Dataset::segments(
            "Top Countries",
            vec![35.0, 30.0, 35.0],
            vec![color("#8470FF"), color("#67BFFF"), color("#4634B1")],
        )],
    );
    PlottersChart::new(config, ChartStyle::default(), (200, 200))
}

fn hooked(chart: PlottersChart, page: &SharedPage, container: &str, aggregate: Option<ValueFormat>) -> SharedChart<PlottersChart> {
    let mut renderer = LegendRenderer::new(Rc::clone(page), container);
    if let Some(format) = aggregate {
        renderer = renderer.with_aggregate(format);
    }
    let chart = Rc::new(RefCell::new(chart));
    chart.borrow_mut().add_update_hook(Box::new(renderer));
    chart.borrow_mut().update(UpdateMode::Default);
    chart
}

fn labels(page: &SharedPage, container: &str) -> Vec<String> {
    page.borrow()
        .legend_items(container)
        .unwrap()
        .iter()
        .map(|item| item.entry.label.clone())
        .collect()
}

#[test]
fn test_entries_follow_label_order() {
    let page = Page::new().with_legend("legend-x").shared();
    let _chart = hooked(traffic_chart(), &page, "legend-x", None);

    let page = page.borrow();
    let items = page.legend_items("legend-x").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].entry.label, "Direct");
    assert_eq!(items[0].entry.swatch_color, color("#67BFFF"));
    assert_eq!(items[1].entry.label, "Referral");
    assert_eq!(items[1].entry.swatch_color, color("#8470FF"));
    assert!(items.iter().all(|item| item.entry.visible && item.opacity == 1.0));
}

#[test]
fn test_entry_count_matches_segments() {
    let page = Page::new().with_legend("countries").shared();
    let chart = hooked(countries_chart(), &page, "countries", None);

    assert_eq!(labels(&page, "countries"), vec!["United States", "Italy", "Other"]);
    assert_eq!(
        page.borrow().legend_items("countries").unwrap().len(),
        chart.borrow().labels().len()
    );
}

#[test]
fn test_click_toggles_exactly_one_dataset() {
    let page = Page::new().with_legend("legend-x").shared();
    let chart = hooked(traffic_chart(), &page, "legend-x", None);

    assert!(click(&page, &chart, "legend-x", 1));
    {
        let chart = chart.borrow();
        assert!(chart.is_dataset_visible(0));
        assert!(!chart.is_dataset_visible(1));
        assert_eq!(chart.last_update(), Some(UpdateMode::Default));
    }
    let page_ref = page.borrow();
    let items = page_ref.legend_items("legend-x").unwrap();
    assert_eq!(items[0].opacity, 1.0);
    assert_eq!(items[1].opacity, HIDDEN_OPACITY);
    assert!(!items[1].entry.visible);
    drop(page_ref);

    assert!(click(&page, &chart, "legend-x", 1));
    assert!(chart.borrow().is_dataset_visible(1));
}

#[test]
fn test_click_toggles_exactly_one_segment() {
    let page = Page::new().with_legend("countries").shared();
    let chart = hooked(countries_chart(), &page, "countries", None);

    assert!(click(&page, &chart, "countries", 0));
    let chart = chart.borrow();
    assert!(!chart.is_data_visible(0));
    assert!(chart.is_data_visible(1));
    assert!(chart.is_data_visible(2));
    assert_eq!(
        page.borrow().legend_items("countries").unwrap()[0].action,
        LegendAction::ToggleSegment(0)
    );
}

#[test]
fn test_click_out_of_range_is_ignored() {
    let page = Page::new().with_legend("legend-x").shared();
    let chart = hooked(traffic_chart(), &page, "legend-x", None);
    let revision = chart.borrow().revision();

    assert!(!click(&page, &chart, "legend-x", 9));
    assert!(!click(&page, &chart, "elsewhere", 0));
    assert_eq!(chart.borrow().revision(), revision);
}

#[test]
fn test_aggregate_currency_total() {
    let page = Page::new().with_legend("legend-x").shared();
    let _chart = hooked(
        traffic_chart(),
        &page,
        "legend-x",
        Some(ValueFormat::Currency(CurrencyFormat::usd())),
    );

    let page = page.borrow();
    let direct = &page.legend_items("legend-x").unwrap()[0];
    assert_eq!(direct.entry.aggregate_value, Some(8250.0));
    assert_eq!(direct.value_text.as_deref(), Some("$8.25K"));
}

#[test]
fn test_aggregate_unit_rules() {
    let chart = traffic_chart();
    let entries = derive_entries(&chart, true);
    assert_eq!(entries[0].aggregate_value, Some(8250.0));
    assert_eq!(entries[1].aggregate_value, Some(27650.0));
    assert_eq!(ValueFormat::Compact.format(entries[0].aggregate_value.unwrap()), "8.25K");
    assert_eq!(ValueFormat::Percent.format(entries[0].aggregate_value.unwrap()), "8250%");
    assert!(derive_entries(&chart, false).iter().all(|e| e.aggregate_value.is_none()));
}

#[test]
fn test_missing_container_is_noop() {
    let chart = traffic_chart();
    let mut page = Page::new().with_container("bare", LegendContainer::without_list());

    render_legend(&chart, &mut page, "absent", None);
    render_legend(&chart, &mut page, "bare", None);
    assert!(page.container("absent").is_none());
    assert!(page.legend_items("bare").is_none());
}

#[test]
fn test_theme_redraw_rerenders_same_legend() {
    let page = Page::new().with_legend("legend-x").shared();
    let chart = hooked(traffic_chart(), &page, "legend-x", None);
    let before = page.borrow().legend_items("legend-x").unwrap().to_vec();

    let mut binding = ChartBinding::new(Rc::clone(&chart), Palette::cartesian(), ThemeMode::Light).unwrap();
    binding.apply(ThemeMode::Dark);
    binding.apply(ThemeMode::Dark);

    assert_eq!(page.borrow().legend_items("legend-x").unwrap(), before.as_slice());
}
