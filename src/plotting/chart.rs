use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::Color as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use crate::error::{ChartError, Result};
use crate::plotting::engine::{Chart, ChartEngine, ChartView, HitTarget, LegendLabel, UpdateHook};
use crate::plotting::options::OptionTree;
use crate::plotting::styles::{paths, ChartStyle};
use crate::types::{ChartKind, LegendScope, UpdateMode};
use crate::utils::{Color, Gradient, ValueFormat};

const DEFAULT_TICK: Color = Color::rgb(0x9C, 0xA3, 0xAF);
const DEFAULT_GRID: Color = Color::rgb(0xF3, 0xF4, 0xF6);
const DEFAULT_CUTOUT: f64 = 0.8;
const RADIAL_RINGS: u32 = 4;
const TOOLTIP_TITLE_DEFAULT: Color = Color::rgb(0x1F, 0x29, 0x37);
const TOOLTIP_BODY_DEFAULT: Color = Color::rgb(0x6B, 0x72, 0x80);
const TOOLTIP_BORDER_DEFAULT: Color = Color::rgb(0xE5, 0xE7, 0xEB);

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// One series of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// One color for line and bar series, one per segment for radial charts.
    pub colors: Vec<Color>,
    #[serde(default)]
    pub fill: Option<Gradient>,
    #[serde(default)]
    pub hidden: bool,
}

impl Dataset {
    pub fn series(label: impl Into<String>, data: Vec<f64>, color: Color) -> Self {
        Self {
            label: Some(label.into()),
            data,
            colors: vec![color],
            fill: None,
            hidden: false,
        }
    }

    pub fn segments(label: impl Into<String>, data: Vec<f64>, colors: Vec<Color>) -> Self {
        Self {
            label: Some(label.into()),
            data,
            colors,
            fill: None,
            hidden: false,
        }
    }

    pub fn with_fill(mut self, gradient: Gradient) -> Self {
        self.fill = Some(gradient);
        self
    }

    /// Color for data index `index`, cycling through the configured colors.
    pub fn color_at(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::TRANSPARENT;
        }
        self.colors[index % self.colors.len()]
    }

    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// Everything needed to construct a chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub options: OptionTree,
    #[serde(default)]
    pub value_format: ValueFormat,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            kind,
            labels,
            datasets,
            options: default_options(kind),
            value_format: ValueFormat::default(),
        }
    }

    pub fn with_value_format(mut self, format: ValueFormat) -> Self {
        self.value_format = format;
        self
    }

    pub fn with_options(mut self, options: OptionTree) -> Self {
        self.options = options;
        self
    }

    /// Stack the datasets of a bar chart instead of grouping them.
    pub fn stacked(mut self) -> Self {
        self.options.merge(json!({
            "scales": { "x": { "stacked": true }, "y": { "stacked": true } },
        }));
        self
    }

    /// Lay bars along the y axis, values along x.
    pub fn horizontal(mut self) -> Self {
        self.options.merge(json!({
            "indexAxis": "y",
            "scales": {
                "x": { "grid": { "display": true }, "ticks": { "maxTicksLimit": 3 } },
                "y": { "grid": { "display": false } },
            },
        }));
        self
    }
}

fn default_options(kind: ChartKind) -> OptionTree {
    let mut options = match kind {
        ChartKind::Line | ChartKind::Bar => json!({
            "layout": { "padding": 20 },
            "scales": {
                "x": { "display": true, "grid": { "display": false }, "ticks": {} },
                "y": { "display": true, "beginAtZero": true, "grid": {}, "ticks": { "maxTicksLimit": 5 } },
            },
        }),
        ChartKind::Doughnut => json!({ "cutout": "80%", "layout": { "padding": 24 } }),
        ChartKind::PolarArea => json!({
            "layout": { "padding": 24 },
            "scales": { "r": { "grid": {}, "ticks": {} } },
        }),
        ChartKind::Pie => json!({ "layout": { "padding": 24 } }),
    };
    options["plugins"] = json!({ "legend": { "display": false }, "tooltip": {} });
    options["animation"] = json!({ "duration": 200 });
    OptionTree::new(options)
}

/// Date labels in `MM-DD-YYYY` form are shown as `MMM YY`.
pub fn axis_label(raw: &str) -> String {
    chrono::NaiveDate::parse_from_str(raw, "%m-%d-%Y")
        .map(|date| date.format("%b %y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Value range for a cartesian y axis, always including zero.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if (max - min).abs() < f64::EPSILON {
        return (min, min + 1.0);
    }
    (min * 1.1, max * 1.1)
}

/// In-memory chart instance drawn with plotters.
pub struct PlottersChart {
    kind: ChartKind,
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    hidden_data: BTreeSet<usize>,
    options: OptionTree,
    value_format: ValueFormat,
    style: ChartStyle,
    size: (u32, u32),
    hooks: Vec<Box<dyn UpdateHook>>,
    revision: u64,
    last_update: Option<UpdateMode>,
}

impl PlottersChart {
    pub fn new(config: ChartConfig, style: ChartStyle, size: (u32, u32)) -> Self {
        Self {
            kind: config.kind,
            labels: config.labels,
            datasets: config.datasets,
            hidden_data: BTreeSet::new(),
            options: config.options,
            value_format: config.value_format,
            style,
            size,
            hooks: Vec::new(),
            revision: 0,
            last_update: None,
        }
    }

    /// Incremented on every update; renderers use it to skip unchanged frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_update(&self) -> Option<UpdateMode> {
        self.last_update
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn value_format(&self) -> &ValueFormat {
        &self.value_format
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn set_dataset_values(&mut self, dataset: usize, values: Vec<f64>) -> Result<()> {
        let target = self
            .datasets
            .get_mut(dataset)
            .ok_or(ChartError::UnknownDataset(dataset))?;
        target.data = values;
        Ok(())
    }

    /// Drop the oldest point of the first dataset and append `value`.
    ///
    /// The caller is responsible for the following update.
    pub fn push_point(&mut self, label: impl Into<String>, value: f64) {
        if !self.labels.is_empty() {
            self.labels.remove(0);
        }
        self.labels.push(label.into());
        if let Some(dataset) = self.datasets.first_mut() {
            if !dataset.data.is_empty() {
                dataset.data.remove(0);
            }
            dataset.data.push(value);
        }
    }

    /// Render the current state into a packed RGB buffer of `size()` pixels.
    pub fn render_rgb(&self) -> Result<Vec<u8>> {
        let (width, height) = self.size;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            let background = self.options.get_color(paths::BACKGROUND).unwrap_or(Color::WHITE);
            root.fill(&background.to_plotters()).map_err(render_err)?;
            if self.kind.is_cartesian() {
                self.draw_cartesian(&root)?;
            } else {
                self.draw_radial(&root)?;
            }
            root.present().map_err(render_err)?;
        }
        Ok(buffer)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let (width, height) = self.size;
        let image = image::RgbImage::from_raw(width, height, self.render_rgb()?)
            .ok_or_else(|| ChartError::Render("buffer size mismatch".to_string()))?;
        image.save(path.as_ref()).map_err(render_err)
    }

    fn draw_cartesian(&self, root: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
        let horizontal = self.is_horizontal();
        let slots = self.labels.len().max(1) as f64;
        let (min_val, max_val) = self.value_bounds();

        let label_area = |axis: &str| {
            if self.axis_shown(axis) {
                self.style.label_area_size
            } else {
                0
            }
        };
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(self.style.margin)
            .x_label_area_size(label_area("x"))
            .y_label_area_size(label_area("y"));
        let mut chart = if horizontal {
            builder.build_cartesian_2d(min_val..max_val, 0f64..slots)
        } else {
            builder.build_cartesian_2d(0f64..slots, min_val..max_val)
        }
        .map_err(render_err)?;

        let value_axis = if horizontal { "x" } else { "y" };
        let x_tick = self.options.get_color(paths::X_TICK_COLOR).unwrap_or(DEFAULT_TICK);
        let y_tick = self.options.get_color(paths::Y_TICK_COLOR).unwrap_or(DEFAULT_TICK);
        let grid = self
            .options
            .get_color(&format!("scales.{value_axis}.grid.color"))
            .unwrap_or(DEFAULT_GRID);
        let value_ticks = self
            .options
            .get_f64(&format!("scales.{value_axis}.ticks.maxTicksLimit"))
            .map(|n| n as usize)
            .unwrap_or(5);
        let category_ticks = self.labels.len().min(6);

        let labels = &self.labels;
        let category_formatter = |c: &f64| {
            let idx = c.floor() as usize;
            labels.get(idx).map(|raw| axis_label(raw)).unwrap_or_default()
        };
        let format = &self.value_format;
        let value_formatter = |v: &f64| format.format(*v);
        let (x_formatter, y_formatter): (&dyn Fn(&f64) -> String, &dyn Fn(&f64) -> String) = if horizontal {
            (&value_formatter, &category_formatter)
        } else {
            (&category_formatter, &value_formatter)
        };
        let (x_count, y_count) = if horizontal {
            (value_ticks, category_ticks)
        } else {
            (category_ticks, value_ticks)
        };

        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(TRANSPARENT)
            .bold_line_style(grid.to_plotters())
            .axis_style(TRANSPARENT)
            .x_labels(x_count)
            .y_labels(y_count)
            .x_label_style(("sans-serif", self.style.font_size as f64).into_font().color(&x_tick.to_plotters()))
            .y_label_style(("sans-serif", self.style.font_size as f64).into_font().color(&y_tick.to_plotters()))
            .x_label_formatter(x_formatter)
            .y_label_formatter(y_formatter);
        if !self.options.get_bool("scales.x.grid.display").unwrap_or(true) {
            mesh.disable_x_mesh();
        }
        if !self.options.get_bool("scales.y.grid.display").unwrap_or(true) {
            mesh.disable_y_mesh();
        }
        if !self.axis_shown("x") {
            mesh.disable_x_axis();
        }
        if !self.axis_shown("y") {
            mesh.disable_y_axis();
        }
        // Labels need a system font; the data is drawn regardless.
        if let Err(e) = mesh.draw() {
            tracing::debug!(error = %e, "axis labels skipped");
        }

        let at = |category: f64, value: f64| if horizontal { (value, category) } else { (category, value) };
        match self.kind {
            ChartKind::Bar => {
                for bar in self.bars() {
                    let color = bar.color.to_plotters();
                    chart
                        .draw_series(std::iter::once(Rectangle::new(
                            [at(bar.start, bar.base), at(bar.end, bar.top)],
                            color.filled(),
                        )))
                        .map_err(render_err)?;
                }
            }
            _ => {
                for (_, dataset) in self.visible_datasets() {
                    let color = dataset.color_at(0);
                    let points: Vec<(f64, f64)> = dataset
                        .data
                        .iter()
                        .enumerate()
                        .filter(|(_, v)| v.is_finite())
                        .map(|(i, v)| at(i as f64 + 0.5, *v))
                        .collect();
                    if let Some(gradient) = &dataset.fill {
                        let area = gradient.sample(1.0).to_plotters();
                        chart
                            .draw_series(AreaSeries::new(points.clone(), 0.0, area.filled()))
                            .map_err(render_err)?;
                    }
                    chart
                        .draw_series(LineSeries::new(
                            points,
                            color.to_plotters().stroke_width(self.style.line_width),
                        ))
                        .map_err(render_err)?;
                }
            }
        }
        Ok(())
    }

    fn draw_radial(&self, root: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
        let Some(dataset) = self.datasets.first() else {
            return Ok(());
        };
        let (center, radius) = self.radial_geometry();

        if self.kind == ChartKind::PolarArea {
            let grid = self.options.get_color(paths::R_GRID_COLOR).unwrap_or(DEFAULT_GRID);
            for step in 1..=RADIAL_RINGS {
                let ring = radius * step as f64 / RADIAL_RINGS as f64;
                root.draw(&Circle::new(
                    (center.0 as i32, center.1 as i32),
                    ring as u32,
                    grid.to_plotters().stroke_width(1),
                ))
                .map_err(render_err)?;
            }
        }

        for wedge in self.wedges() {
            let points = ring_segment(center, wedge.inner, wedge.outer, wedge.start, wedge.end);
            root.draw(&Polygon::new(points, dataset.color_at(wedge.index).to_plotters().filled()))
                .map_err(render_err)?;
        }

        if self.kind == ChartKind::PolarArea {
            self.draw_radial_ticks(root, center, radius)?;
        }
        Ok(())
    }

    /// Value labels on the polar-area rings, each on its own backdrop.
    fn draw_radial_ticks(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        center: (f64, f64),
        radius: f64,
    ) -> Result<()> {
        let peak = self.polar_peak();
        if peak <= 0.0 {
            return Ok(());
        }
        let color = self.options.get_color(paths::R_TICK_COLOR).unwrap_or(DEFAULT_TICK);
        let backdrop = self.options.get_color(paths::R_TICK_BACKDROP).unwrap_or(Color::WHITE);
        let font_size = self.style.font_size as f64 * 0.8;

        for step in 1..=RADIAL_RINGS {
            let fraction = step as f64 / RADIAL_RINGS as f64;
            let text = self.value_format.format(peak * fraction);
            let half_width = text.chars().count() as f64 * font_size * 0.3 + 2.0;
            let half_height = font_size / 2.0 + 1.0;
            let (x, y) = (center.0, center.1 - radius * fraction);
            let left = (x - half_width) as i32;
            let top = (y - half_height) as i32;

            root.draw(&Rectangle::new(
                [(left, top), ((x + half_width) as i32, (y + half_height) as i32)],
                backdrop.to_plotters().filled(),
            ))
            .map_err(render_err)?;
            let label = Text::new(
                text,
                (left + 2, top + 1),
                ("sans-serif", font_size).into_font().color(&color.to_plotters()),
            );
            if let Err(e) = root.draw(&label) {
                tracing::debug!(error = %e, "radial tick label skipped");
            }
        }
        Ok(())
    }

    /// Doughnut hole as a fraction of the radius, from `options.cutout`.
    fn cutout(&self) -> f64 {
        let ratio = match self.options.get("cutout") {
            Some(serde_json::Value::String(s)) => s
                .trim()
                .strip_suffix('%')
                .and_then(|p| p.trim().parse::<f64>().ok())
                .map(|p| p / 100.0)
                .unwrap_or(DEFAULT_CUTOUT),
            Some(value) => value.as_f64().unwrap_or(DEFAULT_CUTOUT),
            None => DEFAULT_CUTOUT,
        };
        ratio.clamp(0.0, 0.99)
    }

    fn axis_shown(&self, axis: &str) -> bool {
        self.options.get_bool(&format!("scales.{axis}.display")).unwrap_or(true)
    }

    /// Bars laid along the y axis (`indexAxis: "y"`).
    pub fn is_horizontal(&self) -> bool {
        self.kind == ChartKind::Bar && self.options.get_str("indexAxis") == Some("y")
    }

    pub fn is_stacked(&self) -> bool {
        self.kind == ChartKind::Bar
            && (self.options.get_bool("scales.x.stacked").unwrap_or(false)
                || self.options.get_bool("scales.y.stacked").unwrap_or(false))
    }

    fn visible_datasets(&self) -> Vec<(usize, &Dataset)> {
        self.datasets.iter().enumerate().filter(|(_, d)| !d.hidden).collect()
    }

    /// Bars of the visible datasets in category/value space. Stacked bars
    /// pile positive and negative values on separate stacks.
    pub(crate) fn bars(&self) -> Vec<BarRect> {
        let visible = self.visible_datasets();
        let group = self.style.bar_percentage;
        let offset = (1.0 - group) / 2.0;
        let mut bars = Vec::new();

        if self.is_stacked() {
            let mut positive: Vec<f64> = Vec::new();
            let mut negative: Vec<f64> = Vec::new();
            for (dataset, data) in &visible {
                for (index, value) in data.data.iter().enumerate() {
                    if !value.is_finite() {
                        continue;
                    }
                    if positive.len() <= index {
                        positive.resize(index + 1, 0.0);
                        negative.resize(index + 1, 0.0);
                    }
                    let stack = if *value >= 0.0 {
                        &mut positive[index]
                    } else {
                        &mut negative[index]
                    };
                    let base = *stack;
                    *stack += value;
                    let start = index as f64 + offset;
                    bars.push(BarRect {
                        dataset: *dataset,
                        index,
                        start,
                        end: start + group,
                        base,
                        top: *stack,
                        color: data.color_at(0),
                    });
                }
            }
        } else {
            let width = group / visible.len().max(1) as f64;
            for (slot, (dataset, data)) in visible.iter().enumerate() {
                for (index, value) in data.data.iter().enumerate() {
                    if !value.is_finite() {
                        continue;
                    }
                    let start = index as f64 + offset + slot as f64 * width;
                    bars.push(BarRect {
                        dataset: *dataset,
                        index,
                        start,
                        end: start + width,
                        base: 0.0,
                        top: *value,
                        color: data.color_at(0),
                    });
                }
            }
        }
        bars
    }

    fn value_bounds(&self) -> (f64, f64) {
        if self.kind == ChartKind::Bar {
            value_range(self.bars().iter().flat_map(|b| [b.base, b.top]))
        } else {
            value_range(
                self.visible_datasets()
                    .into_iter()
                    .flat_map(|(_, d)| d.data.iter().copied()),
            )
        }
    }

    /// `(left, top, right, bottom)` pixel bounds of the cartesian plot area.
    fn plot_area(&self) -> (f64, f64, f64, f64) {
        let (width, height) = self.size;
        let margin = self.style.margin as f64;
        let area = |axis: &str| {
            if self.axis_shown(axis) {
                self.style.label_area_size as f64
            } else {
                0.0
            }
        };
        (
            margin + area("y"),
            margin,
            width as f64 - margin,
            height as f64 - margin - area("x"),
        )
    }

    fn hit_cartesian(&self, x: f64, y: f64) -> Option<HitTarget> {
        let (left, top, right, bottom) = self.plot_area();
        if right <= left || bottom <= top || x < left || x > right || y < top || y > bottom {
            return None;
        }
        let slots = self.labels.len().max(1) as f64;
        let (min_val, max_val) = self.value_bounds();
        let horizontal = self.is_horizontal();
        let to_pixel = |category: f64, value: f64| {
            let value_t = (value - min_val) / (max_val - min_val);
            let category_t = category / slots;
            if horizontal {
                (left + value_t * (right - left), bottom - category_t * (bottom - top))
            } else {
                (left + category_t * (right - left), bottom - value_t * (bottom - top))
            }
        };
        let pointer = if horizontal {
            (bottom - y) / (bottom - top) * slots
        } else {
            (x - left) / (right - left) * slots
        };
        let slot = pointer.floor().max(0.0) as usize;

        let anchors: Vec<(usize, usize, f64, f64)> = if self.kind == ChartKind::Bar {
            self.bars()
                .into_iter()
                .map(|b| (b.dataset, b.index, (b.start + b.end) / 2.0, b.top))
                .collect()
        } else {
            self.visible_datasets()
                .into_iter()
                .flat_map(|(dataset, d)| {
                    d.data
                        .iter()
                        .enumerate()
                        .filter(|(_, v)| v.is_finite())
                        .map(move |(index, v)| (dataset, index, index as f64 + 0.5, *v))
                })
                .collect()
        };

        anchors
            .into_iter()
            .filter(|(_, index, _, _)| *index == slot)
            .map(|(dataset, index, category, value)| {
                let (px, py) = to_pixel(category, value);
                ((px - x).powi(2) + (py - y).powi(2), HitTarget { dataset, index })
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hit)| hit)
    }

    fn radial_geometry(&self) -> ((f64, f64), f64) {
        let (width, height) = self.size;
        let center = (width as f64 / 2.0, height as f64 / 2.0);
        let radius = (width.min(height) as f64 / 2.0 - self.style.margin as f64).max(1.0);
        (center, radius)
    }

    /// Visible, non-negative segment values of the first dataset.
    fn radial_values(&self) -> Vec<(usize, f64)> {
        self.datasets
            .first()
            .map(|dataset| {
                dataset
                    .data
                    .iter()
                    .enumerate()
                    .filter(|(i, v)| self.is_data_visible(*i) && v.is_finite())
                    .map(|(i, v)| (i, v.max(0.0)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn polar_peak(&self) -> f64 {
        self.radial_values().iter().map(|(_, v)| *v).fold(0.0, f64::max)
    }

    /// Wedges of a radial chart, clockwise from twelve o'clock.
    fn wedges(&self) -> Vec<Wedge> {
        let (_, radius) = self.radial_geometry();
        let segments = self.radial_values();

        if self.kind == ChartKind::PolarArea {
            let peak = self.polar_peak();
            if peak <= 0.0 || segments.is_empty() {
                return Vec::new();
            }
            let sweep = TAU / segments.len() as f64;
            return segments
                .iter()
                .enumerate()
                .map(|(n, (index, value))| {
                    let start = -FRAC_PI_2 + n as f64 * sweep;
                    Wedge {
                        index: *index,
                        start,
                        end: start + sweep,
                        inner: 0.0,
                        outer: radius * value / peak,
                    }
                })
                .collect();
        }

        let total: f64 = segments.iter().map(|(_, v)| v).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        let inner = if self.kind == ChartKind::Doughnut {
            radius * self.cutout()
        } else {
            0.0
        };
        let mut start = -FRAC_PI_2;
        segments
            .into_iter()
            .map(|(index, value)| {
                let end = start + value / total * TAU;
                let wedge = Wedge {
                    index,
                    start,
                    end,
                    inner,
                    outer: radius,
                };
                start = end;
                wedge
            })
            .collect()
    }

    fn hit_radial(&self, x: f64, y: f64) -> Option<HitTarget> {
        let (center, _) = self.radial_geometry();
        let (dx, dy) = (x - center.0, y - center.1);
        let distance = dx.hypot(dy);
        let mut angle = dy.atan2(dx);
        while angle < -FRAC_PI_2 {
            angle += TAU;
        }
        while angle >= -FRAC_PI_2 + TAU {
            angle -= TAU;
        }
        self.wedges()
            .into_iter()
            .find(|w| angle >= w.start && angle < w.end && distance >= w.inner && distance <= w.outer)
            .map(|w| HitTarget {
                dataset: 0,
                index: w.index,
            })
    }

    /// The hover tooltip for pixel `(x, y)`, colored from the option tree.
    ///
    /// The title (the point's label) is shown only when the chart's options
    /// carry a tooltip title color.
    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<Tooltip> {
        let hit = self.hit_test(x, y)?;
        let value = *self.datasets.get(hit.dataset)?.data.get(hit.index)?;
        let title = self
            .options
            .get(paths::TOOLTIP_TITLE)
            .and(self.labels.get(hit.index))
            .map(|raw| axis_label(raw));
        let color = |path: &str, fallback: Color| self.options.get_color(path).unwrap_or(fallback);
        Some(Tooltip {
            hit,
            title,
            body: self.value_format.format(value),
            title_color: color(paths::TOOLTIP_TITLE, TOOLTIP_TITLE_DEFAULT),
            body_color: color(paths::TOOLTIP_BODY, TOOLTIP_BODY_DEFAULT),
            background: color(paths::TOOLTIP_BACKGROUND, Color::WHITE),
            border: color(paths::TOOLTIP_BORDER, TOOLTIP_BORDER_DEFAULT),
        })
    }
}

/// One bar, in category (`start..end`) and value (`base..top`) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BarRect {
    pub dataset: usize,
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub base: f64,
    pub top: f64,
    pub color: Color,
}

/// One radial segment; angles in radians, radii in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wedge {
    index: usize,
    start: f64,
    end: f64,
    inner: f64,
    outer: f64,
}

/// Hover tooltip content for one data point.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub hit: HitTarget,
    pub title: Option<String>,
    pub body: String,
    pub title_color: Color,
    pub body_color: Color,
    pub background: Color,
    pub border: Color,
}

/// Outline of an annular sector in pixel coordinates.
fn ring_segment(center: (f64, f64), inner: f64, outer: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start).abs() / (TAU / 180.0)).ceil() as usize).max(2);
    let point = |r: f64, angle: f64| {
        (
            (center.0 + r * angle.cos()).round() as i32,
            (center.1 + r * angle.sin()).round() as i32,
        )
    };
    let angle_at = |step: usize| start + (end - start) * step as f64 / steps as f64;
    let mut points: Vec<(i32, i32)> = (0..=steps).map(|s| point(outer, angle_at(s))).collect();
    if inner > 0.0 {
        points.extend((0..=steps).rev().map(|s| point(inner, angle_at(s))));
    } else {
        points.push(point(0.0, start));
    }
    points
}

impl ChartView for PlottersChart {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn options(&self) -> &OptionTree {
        &self.options
    }

    fn legend_labels(&self) -> Vec<LegendLabel> {
        match self.legend_scope() {
            LegendScope::Datasets => self
                .datasets
                .iter()
                .enumerate()
                .map(|(index, dataset)| LegendLabel {
                    text: dataset.label.clone().unwrap_or_default(),
                    fill: dataset.color_at(0),
                    hidden: dataset.hidden,
                    index,
                })
                .collect(),
            LegendScope::Segments => self
                .labels
                .iter()
                .enumerate()
                .map(|(index, text)| LegendLabel {
                    text: text.clone(),
                    fill: self
                        .datasets
                        .first()
                        .map(|d| d.color_at(index))
                        .unwrap_or(Color::TRANSPARENT),
                    hidden: !self.is_data_visible(index),
                    index,
                })
                .collect(),
        }
    }

    fn is_dataset_visible(&self, dataset: usize) -> bool {
        self.datasets.get(dataset).map(|d| !d.hidden).unwrap_or(false)
    }

    fn is_data_visible(&self, index: usize) -> bool {
        !self.hidden_data.contains(&index)
    }

    fn dataset_values(&self, dataset: usize) -> Option<&[f64]> {
        self.datasets.get(dataset).map(|d| d.data.as_slice())
    }

    fn hit_test(&self, x: f64, y: f64) -> Option<HitTarget> {
        if self.kind.is_cartesian() {
            self.hit_cartesian(x, y)
        } else {
            self.hit_radial(x, y)
        }
    }
}

impl Chart for PlottersChart {
    fn options_mut(&mut self) -> &mut OptionTree {
        &mut self.options
    }

    fn set_dataset_visibility(&mut self, dataset: usize, visible: bool) {
        match self.datasets.get_mut(dataset) {
            Some(target) => target.hidden = !visible,
            None => tracing::debug!(dataset, "visibility change for unknown dataset ignored"),
        }
    }

    fn toggle_data_visibility(&mut self, index: usize) {
        if !self.hidden_data.remove(&index) {
            self.hidden_data.insert(index);
        }
    }

    fn update(&mut self, mode: UpdateMode) {
        self.revision += 1;
        self.last_update = Some(mode);
        tracing::trace!(kind = ?self.kind, revision = self.revision, ?mode, "chart updated");
        let mut hooks = std::mem::take(&mut self.hooks);
        for hook in hooks.iter_mut() {
            hook.after_update(&*self);
        }
        self.hooks = hooks;
    }

    fn add_update_hook(&mut self, hook: Box<dyn UpdateHook>) {
        self.hooks.push(hook);
    }
}

/// Constructs [`PlottersChart`] instances with a shared style and size.
#[derive(Debug, Clone)]
pub struct PlottersEngine {
    pub style: ChartStyle,
    pub size: (u32, u32),
}

impl Default for PlottersEngine {
    fn default() -> Self {
        Self {
            style: ChartStyle::default(),
            size: (480, 280),
        }
    }
}

impl ChartEngine for PlottersEngine {
    type Chart = PlottersChart;

    fn construct(&self, config: ChartConfig) -> PlottersChart {
        PlottersChart::new(config, self.style.clone(), self.size)
    }
}
