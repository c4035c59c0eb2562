pub mod chart;
pub mod engine;
pub mod options;
pub mod styles;


pub use chart::{axis_label, ChartConfig, Dataset, PlottersChart, PlottersEngine, Tooltip};
pub use engine::{Chart, ChartEngine, ChartView, HitTarget, LegendLabel, UpdateHook};
pub use options::OptionTree;
pub use styles::{paths, ChartStyle};
