//! Demo datasets for the sample dashboard. The numbers are illustrative.

use crate::legend::Page;
use crate::plotting::{ChartConfig, Dataset};
use crate::theme::Palette;
use crate::types::ChartKind;
use crate::utils::{Color, CurrencyFormat, Gradient, ValueFormat};

use super::factory::{LegendSpec, WidgetSpec};

pub const LIVE_ELEMENT_ID: &str = "dashboard-card-05";
/// Points visible at once on the live chart.
pub const LIVE_WINDOW: usize = 35;

const INDIGO: Color = Color::rgb(0x84, 0x70, 0xFF);
const SKY: Color = Color::rgb(0x67, 0xBF, 0xFF);
const LIGHT_SKY: Color = Color::rgb(0x7B, 0xC8, 0xFF);
const PALE_INDIGO: Color = Color::rgb(0xD2, 0xCB, 0xFF);
const VIOLET: Color = Color::rgb(0x46, 0x34, 0xB1);
const GREEN: Color = Color::rgb(0x4B, 0xD3, 0x7D);
const EMERALD: Color = Color::rgb(0x3E, 0xC9, 0x72);
const YELLOW: Color = Color::rgb(0xF7, 0xCD, 0x4C);
const GRAY: Color = Color::rgb(0x6B, 0x72, 0x80);

fn months(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let month = (11 + i) % 12 + 1;
            let year = 2022 + (11 + i) / 12;
            format!("{month:02}-01-{year}")
        })
        .collect()
}

fn strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn spec(element_id: &str, config: ChartConfig, palette: Palette, legend: Option<LegendSpec>) -> WidgetSpec {
    WidgetSpec {
        element_id: element_id.to_string(),
        config,
        palette: palette.with_background(),
        legend,
    }
}

fn legend(id: &str, aggregate: Option<ValueFormat>) -> Option<LegendSpec> {
    Some(LegendSpec {
        container_id: format!("{id}-legend"),
        aggregate,
    })
}

/// Sales line against the previous period.
pub fn sales_line(currency: &CurrencyFormat) -> WidgetSpec {
    let current = vec![
        732.0, 610.0, 610.0, 504.0, 504.0, 504.0, 349.0, 349.0, 504.0, 342.0, 504.0, 610.0, 391.0,
        192.0, 154.0, 273.0, 191.0, 191.0, 126.0, 263.0, 349.0, 252.0, 423.0, 622.0, 470.0, 532.0,
    ];
    let previous = vec![
        532.0, 532.0, 532.0, 404.0, 404.0, 314.0, 314.0, 314.0, 314.0, 314.0, 234.0, 314.0, 234.0,
        234.0, 314.0, 314.0, 314.0, 388.0, 314.0, 202.0, 202.0, 202.0, 202.0, 314.0, 720.0, 642.0,
    ];
    let config = ChartConfig::new(
        ChartKind::Line,
        months(current.len()),
        vec![
            Dataset::series("Current", current, INDIGO).with_fill(Gradient::fade(INDIGO, 0.2)),
            Dataset::series("Previous", previous, GRAY.with_alpha(0.25)),
        ],
    )
    .with_value_format(ValueFormat::Currency(currency.clone()));
    spec("dashboard-card-01", config, Palette::cartesian(), None)
}

/// Direct versus indirect traffic with totals in the legend.
pub fn traffic_bars(currency: &CurrencyFormat) -> WidgetSpec {
    let format = ValueFormat::Currency(currency.clone());
    let config = ChartConfig::new(
        ChartKind::Bar,
        months(6),
        vec![
            Dataset::series("Direct", vec![800.0, 1600.0, 900.0, 1300.0, 1950.0, 1700.0], SKY),
            Dataset::series("Indirect", vec![4900.0, 2600.0, 5350.0, 4800.0, 5200.0, 4800.0], INDIGO),
        ],
    )
    .with_value_format(format.clone());
    spec("dashboard-card-04", config, Palette::cartesian(), legend("dashboard-card-04", Some(format)))
}

/// Revenue against expenses, stacked around zero.
pub fn revenue_stacked(currency: &CurrencyFormat) -> WidgetSpec {
    let config = ChartConfig::new(
        ChartKind::Bar,
        months(6),
        vec![
            Dataset::series("Stack 1", vec![6200.0, 9200.0, 6600.0, 8800.0, 5200.0, 9200.0], INDIGO),
            Dataset::series("Stack 2", vec![-4000.0, -2600.0, -5350.0, -4000.0, -7500.0, -2000.0], PALE_INDIGO),
        ],
    )
    .stacked()
    .with_value_format(ValueFormat::Currency(currency.clone()));
    spec("dashboard-card-09", config, Palette::cartesian(), None)
}

/// New and returning visitors as bars along the y axis.
pub fn visitors_horizontal() -> WidgetSpec {
    let config = ChartConfig::new(
        ChartKind::Bar,
        strings(&["02-01-2023", "03-01-2023", "04-01-2023", "05-01-2023"]),
        vec![
            Dataset::series("New Visitors", vec![8000.0, 3800.0, 5350.0, 7800.0], INDIGO),
            Dataset::series("Returning Visitors", vec![4000.0, 6500.0, 2200.0, 5800.0], LIGHT_SKY),
        ],
    )
    .horizontal();
    spec("analytics-card-04", config, Palette::horizontal(), legend("analytics-card-04", None))
}

pub fn countries_doughnut() -> WidgetSpec {
    let config = ChartConfig::new(
        ChartKind::Doughnut,
        strings(&["United States", "Italy", "Other"]),
        vec![Dataset::segments("Top Countries", vec![35.0, 30.0, 35.0], vec![INDIGO, SKY, VIOLET])],
    );
    spec("dashboard-card-06", config, Palette::tooltip_with_title(), legend("dashboard-card-06", None))
}

pub fn sessions_polar() -> WidgetSpec {
    let config = ChartConfig::new(
        ChartKind::PolarArea,
        strings(&["Males", "Females", "Unknown"]),
        vec![Dataset::segments(
            "Sessions By Gender",
            vec![500.0, 326.0, 242.0],
            vec![INDIGO.with_alpha(0.8), LIGHT_SKY.with_alpha(0.8), EMERALD.with_alpha(0.8)],
        )],
    );
    spec("analytics-card-10", config, Palette::radial(), legend("analytics-card-10", None))
}

pub fn portfolio_pie() -> WidgetSpec {
    let config = ChartConfig::new(
        ChartKind::Pie,
        strings(&["Cash", "Commodities", "Bonds", "Stock"]),
        vec![Dataset::segments(
            "Portfolio",
            vec![12.0, 13.0, 10.0, 65.0],
            vec![GREEN, YELLOW, LIGHT_SKY, INDIGO],
        )],
    );
    spec("fintech-card-09", config, Palette::tooltip_with_title(), legend("fintech-card-09", None))
}

/// Portfolio return, in percent.
pub fn returns_line() -> WidgetSpec {
    let returns = vec![
        0.0, 2.5, 2.5, 4.0, 2.5, 3.8, 5.0, 9.0, 7.5, 11.0, 14.0, 15.0, 17.0, 15.0, 14.0, 9.0, 15.0,
        26.0, 16.0, 18.0, 15.0, 20.0, 18.0, 19.0, 19.0, 24.0, 29.0, 26.0, 39.0, 27.0, 35.0, 32.0,
        29.0, 35.0, 36.0, 34.0, 39.0, 36.0, 41.0, 41.0, 48.0,
    ];
    let config = ChartConfig::new(
        ChartKind::Line,
        months(returns.len()),
        vec![Dataset::series("Mosaic Portfolio", returns, INDIGO).with_fill(Gradient::fade(INDIGO, 0.2))],
    )
    .with_value_format(ValueFormat::Percent);
    spec("fintech-card-01", config, Palette::cartesian(), legend("fintech-card-01", None))
}

/// The cyclic series replayed by the live feed.
pub fn live_series() -> Vec<f64> {
    vec![
        57.81, 57.75, 55.48, 54.28, 53.14, 52.25, 51.04, 52.49, 55.49, 56.87, 53.73, 56.42, 58.06,
        55.62, 58.16, 55.22, 58.67, 60.18, 61.31, 63.25, 65.91, 64.44, 65.97, 62.27, 60.96, 59.34,
        55.07, 59.85, 53.79, 51.92, 50.95, 49.65, 48.09, 49.81, 47.85, 49.52, 50.21, 52.22, 54.42,
        53.42, 50.91, 58.52, 53.37, 57.58, 59.09, 59.36, 58.71, 59.42, 55.93, 57.71, 50.62, 56.28,
        57.37, 53.08, 55.94, 55.82, 53.94, 52.65, 50.25,
    ]
}

/// Live price line seeded with the first [`LIVE_WINDOW`] points.
pub fn live_line(currency: &CurrencyFormat) -> WidgetSpec {
    let values: Vec<f64> = live_series().into_iter().take(LIVE_WINDOW).collect();
    let labels = (0..values.len()).map(|i| format!("-{}s", (values.len() - i) * 2)).collect();
    let config = ChartConfig::new(
        ChartKind::Line,
        labels,
        vec![Dataset::series("Live", values, INDIGO).with_fill(Gradient::fade(INDIGO, 0.2))],
    )
    .with_value_format(ValueFormat::Currency(currency.clone()));
    spec(LIVE_ELEMENT_ID, config, Palette::cartesian().merged(Palette::tooltip_with_title()), None)
}

/// Every sample widget, in page order.
pub fn dashboard_widgets(currency: &CurrencyFormat) -> Vec<WidgetSpec> {
    vec![
        sales_line(currency),
        traffic_bars(currency),
        live_line(currency),
        revenue_stacked(currency),
        countries_doughnut(),
        sessions_polar(),
        portfolio_pie(),
        returns_line(),
        visitors_horizontal(),
    ]
}

/// A page holding the canvas and legend container of every spec.
pub fn sample_page(specs: &[WidgetSpec]) -> Page {
    specs.iter().fold(Page::new(), |page, spec| {
        let page = page.with_canvas(&spec.element_id);
        match &spec.legend {
            Some(legend) => page.with_legend(&legend.container_id),
            None => page,
        }
    })
}
