use serde::{Deserialize, Serialize};

const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];
const SIGNIFICANT_DIGITS: i32 = 3;

/// Where a currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Locale rules for currency-denominated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub position: SymbolPosition,
    pub decimal_separator: char,
}

impl CurrencyFormat {
    /// `en-US` dollars: `$8.25K`.
    pub fn usd() -> Self {
        Self {
            symbol: "$".to_string(),
            position: SymbolPosition::Prefix,
            decimal_separator: '.',
        }
    }

    /// `de-DE` euros: `8,25K €`.
    pub fn eur() -> Self {
        Self {
            symbol: "€".to_string(),
            position: SymbolPosition::Suffix,
            decimal_separator: ',',
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::usd()
    }
}

/// Unit rule applied to axis ticks, tooltips and legend totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum ValueFormat {
    /// Plain compact number, `12K`.
    #[default]
    Compact,
    /// Compact number with a currency symbol.
    Currency(CurrencyFormat),
    /// The plain value followed by a literal `%`.
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Compact => format_compact(value),
            ValueFormat::Currency(currency) => format_currency(value, currency),
            ValueFormat::Percent => format!("{}%", value),
        }
    }
}

/// Compact notation with at most three significant digits.
pub fn format_compact(value: f64) -> String {
    compact_with_separator(value, '.')
}

fn format_currency(value: f64, currency: &CurrencyFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = compact_with_separator(value.abs(), currency.decimal_separator);
    let sign = if value < 0.0 && magnitude != "0" { "-" } else { "" };
    match currency.position {
        SymbolPosition::Prefix => format!("{sign}{}{magnitude}", currency.symbol),
        SymbolPosition::Suffix => format!("{sign}{magnitude} {}", currency.symbol),
    }
}

fn compact_with_separator(value: f64, separator: char) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let abs = value.abs();
    let mut tier = 0;
    while tier < SUFFIXES.len() - 1 && abs >= 1000f64.powi(tier as i32 + 1) {
        tier += 1;
    }
    let mut scaled = round_significant(abs / 1000f64.powi(tier as i32), SIGNIFICANT_DIGITS);
    // Rounding can carry into the next tier, e.g. 999_999 -> 1000K -> 1M.
    if scaled >= 1000.0 && tier < SUFFIXES.len() - 1 {
        tier += 1;
        scaled /= 1000.0;
    }

    let decimals = if scaled > 0.0 {
        (SIGNIFICANT_DIGITS - 1 - scaled.log10().floor() as i32).max(0) as usize
    } else {
        0
    };
    let mut digits = format!("{:.*}", decimals, scaled);
    if digits.contains('.') {
        digits = digits.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if separator != '.' {
        digits = digits.replace('.', &separator.to_string());
    }
    let sign = if value < 0.0 && digits != "0" { "-" } else { "" };
    format!("{sign}{digits}{}", SUFFIXES[tier])
}

fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32 + 1;
    let factor = 10f64.powi(digits - magnitude);
    (value * factor).round() / factor
}

/// Signed percentage change from `previous` to `value`, e.g. `+1.23%`.
///
/// `None` when the change is undefined (previous value of zero or NaN).
pub fn format_deviation(value: f64, previous: f64) -> Option<String> {
    let diff = (value - previous) / previous * 100.0;
    if !diff.is_finite() {
        return None;
    }
    let sign = if diff > 0.0 { "+" } else { "" };
    Some(format!("{sign}{diff:.2}%"))
}
