//! # Errors
//!
//! Error type shared by the palette, option tree, legend and persistence code.

use thiserror::Error;

/// Errors raised while binding, theming or rendering charts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A chart canvas or legend container id is not present on the page.
    #[error("element `{0}` is not present on the page")]
    MissingElement(String),
    /// A palette property points at a path the option tree cannot hold.
    #[error("no option at `{path}` for palette property")]
    MalformedPaletteReference { path: String },
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("chart has no dataset at index {0}")]
    UnknownDataset(usize),
    #[error("render failed: {0}")]
    Render(String),
    #[error("preferences i/o: {0}")]
    Preferences(#[from] std::io::Error),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
