use serde::{Deserialize, Serialize};

use crate::theme::Palette;
use crate::types::PaletteEntry;
use crate::utils::Color;

/// Option paths the renderer reads colors from.
pub mod paths {
    pub const BACKGROUND: &str = "chartArea.backgroundColor";
    pub const X_TICK_COLOR: &str = "scales.x.ticks.color";
    pub const Y_TICK_COLOR: &str = "scales.y.ticks.color";
    pub const X_GRID_COLOR: &str = "scales.x.grid.color";
    pub const Y_GRID_COLOR: &str = "scales.y.grid.color";
    pub const R_GRID_COLOR: &str = "scales.r.grid.color";
    pub const R_TICK_COLOR: &str = "scales.r.ticks.color";
    pub const R_TICK_BACKDROP: &str = "scales.r.ticks.backdropColor";
    pub const TOOLTIP_TITLE: &str = "plugins.tooltip.titleColor";
    pub const TOOLTIP_BODY: &str = "plugins.tooltip.bodyColor";
    pub const TOOLTIP_BACKGROUND: &str = "plugins.tooltip.backgroundColor";
    pub const TOOLTIP_BORDER: &str = "plugins.tooltip.borderColor";
}

/// Chart geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    /// Fraction of each category slot occupied by the bar group.
    pub bar_percentage: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            font_size: 13,
            margin: 20,
            label_area_size: 40,
            bar_percentage: 0.7,
        }
    }
}

fn entry(light: Color, dark: Color) -> PaletteEntry {
    PaletteEntry::new(light, dark)
}

const GRAY_100: Color = Color::rgb(0xF3, 0xF4, 0xF6);
const GRAY_200: Color = Color::rgb(0xE5, 0xE7, 0xEB);
const GRAY_400: Color = Color::rgb(0x9C, 0xA3, 0xAF);
const GRAY_500: Color = Color::rgb(0x6B, 0x72, 0x80);
const GRAY_600: Color = Color::rgb(0x4B, 0x55, 0x63);
const GRAY_700: Color = Color::rgb(0x37, 0x41, 0x51);
const GRAY_800: Color = Color::rgb(0x1F, 0x29, 0x37);

impl Palette {
    /// Tooltip body, background and border colors.
    pub fn tooltip() -> Self {
        Palette::new()
            .with(paths::TOOLTIP_BODY, entry(GRAY_500, GRAY_400))
            .with(paths::TOOLTIP_BACKGROUND, entry(Color::WHITE, GRAY_700))
            .with(paths::TOOLTIP_BORDER, entry(GRAY_200, GRAY_600))
    }

    /// [`Palette::tooltip`] plus the tooltip title color.
    pub fn tooltip_with_title() -> Self {
        Palette::tooltip().with(paths::TOOLTIP_TITLE, entry(GRAY_800, GRAY_100))
    }

    /// Axis ticks, horizontal grid lines and tooltip colors.
    pub fn cartesian() -> Self {
        Palette::tooltip()
            .with(paths::X_TICK_COLOR, entry(GRAY_400, GRAY_500))
            .with(paths::Y_TICK_COLOR, entry(GRAY_400, GRAY_500))
            .with(paths::Y_GRID_COLOR, entry(GRAY_100, GRAY_700.with_alpha(0.6)))
    }

    /// [`Palette::cartesian`] for bars laid along the y axis, whose value
    /// grid runs vertically.
    pub fn horizontal() -> Self {
        Palette::tooltip()
            .with(paths::X_TICK_COLOR, entry(GRAY_400, GRAY_500))
            .with(paths::Y_TICK_COLOR, entry(GRAY_400, GRAY_500))
            .with(paths::X_GRID_COLOR, entry(GRAY_100, GRAY_700.with_alpha(0.6)))
    }

    /// Radial scale colors for polar-area charts.
    pub fn radial() -> Self {
        Palette::tooltip_with_title()
            .with(paths::R_GRID_COLOR, entry(GRAY_100, GRAY_700.with_alpha(0.6)))
            .with(paths::R_TICK_COLOR, entry(GRAY_400, GRAY_500))
            .with(paths::R_TICK_BACKDROP, entry(Color::WHITE, GRAY_800))
    }

    /// Adds the chart area background used by the rendered bitmaps.
    pub fn with_background(self) -> Self {
        self.with(paths::BACKGROUND, entry(Color::WHITE, GRAY_800))
    }
}
