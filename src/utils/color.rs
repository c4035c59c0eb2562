use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// An sRGB color with straight (unpremultiplied) alpha.
///
/// Colors travel through the option tree as strings, so `Display` and
/// `FromStr` are the canonical conversions: `#RRGGBB` when opaque and
/// `rgba(r, g, b, a)` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#RGB` or `#RRGGBB` literal.
    pub fn hex(literal: &str) -> Result<Self, ChartError> {
        let invalid = || ChartError::InvalidColor(literal.to_string());
        let digits = literal.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// The same color with a different alpha, clamped to `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// `r,g,b` triplet, suitable for splicing into an `rgba(...)` literal.
    pub fn rgb_triplet(&self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn mix(self, other: Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_plotters(self) -> plotters::style::RGBAColor {
        plotters::style::RGBAColor(self.r, self.g, self.b, self.a)
    }

    pub fn to_egui(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, (self.a * 255.0).round() as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::hex(s);
        }
        let invalid = || ChartError::InvalidColor(s.to_string());
        let (body, has_alpha) = if let Some(body) = s.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = s.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let alpha = if has_alpha {
            parts[3].parse::<f64>().map_err(|_| invalid())?
        } else {
            1.0
        };
        if !(0.0..=1.0).contains(&alpha) {
            return Err(invalid());
        }
        Ok(Self::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// One stop of a [`Gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub stop: f64,
    pub color: Color,
}

/// Vertical fill gradient from the bottom (`0.0`) to the top (`1.0`) of
/// the chart area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.stop.partial_cmp(&b.stop).unwrap_or(std::cmp::Ordering::Equal));
        Self { stops }
    }

    /// Fade from fully transparent at the bottom to `alpha` at the top.
    pub fn fade(color: Color, alpha: f64) -> Self {
        Self::new(vec![
            ColorStop { stop: 0.0, color: color.with_alpha(0.0) },
            ColorStop { stop: 1.0, color: color.with_alpha(alpha) },
        ])
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at position `t`; an empty gradient is transparent.
    pub fn sample(&self, t: f64) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::TRANSPARENT,
        };
        if t <= first.stop {
            return first.color;
        }
        if t >= last.stop {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t >= lo.stop && t <= hi.stop {
                let span = hi.stop - lo.stop;
                if span <= f64::EPSILON {
                    return hi.color;
                }
                return lo.color.mix(hi.color, (t - lo.stop) / span);
            }
        }
        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_long_and_short() {
        assert_eq!(Color::hex("#8470FF").unwrap(), Color::rgb(132, 112, 255));
        assert_eq!(Color::hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::hex("#8470FF").unwrap().rgb_triplet(), "132,112,255");
    }

    #[test]
    fn test_invalid_colors() {
        for literal in ["8470FF", "#12345", "#GGGGGG", "rgba(1, 2, 3)", "rgb(300, 0, 0)", "rgba(1, 2, 3, 2)"] {
            assert!(literal.parse::<Color>().is_err(), "{literal} should not parse");
        }
    }

    #[test]
    fn test_display_round_trip() {
        let grid: Color = "rgba(55, 65, 81, 0.6)".parse().unwrap();
        assert_eq!(grid, Color::hex("#374151").unwrap().with_alpha(0.6));
        assert_eq!(grid.to_string(), "rgba(55, 65, 81, 0.6)");
        assert_eq!(Color::hex("#ffffff").unwrap().to_string(), "#FFFFFF");
    }

    #[test]
    fn test_serde_as_string() {
        let color: Color = serde_json::from_str("\"#9CA3AF\"").unwrap();
        assert_eq!(color, Color::rgb(0x9C, 0xA3, 0xAF));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#9CA3AF\"");
    }

    #[test]
    fn test_gradient_sampling() {
        let gradient = Gradient::fade(Color::hex("#8470FF").unwrap(), 0.2);
        assert_eq!(gradient.sample(0.0).a, 0.0);
        assert_eq!(gradient.sample(1.0).a, 0.2);
        assert!((gradient.sample(0.5).a - 0.1).abs() < 1e-9);
        assert_eq!(Gradient::default().sample(0.5), Color::TRANSPARENT);
    }
}
