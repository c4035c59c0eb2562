pub mod color;
pub mod format;

pub use color::{Color, ColorStop, Gradient};
pub use format::{format_compact, format_deviation, CurrencyFormat, SymbolPosition, ValueFormat};
