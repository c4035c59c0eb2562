//! # External Legends
//!
//! Legends rendered outside the chart canvas, rebuilt from the chart's own
//! label generator after every update. Each entry toggles the visibility of
//! the dataset or segment it stands for.

pub mod page;
pub mod renderer;

#[cfg(test)]
mod tests;

pub use page::{LegendAction, LegendContainer, LegendItem, Page, SharedPage, HIDDEN_OPACITY};
pub use renderer::{click, derive_entries, render_legend, LegendRenderer};
