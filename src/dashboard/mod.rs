pub mod factory;
pub mod samples;

pub use factory::{create_widget, LegendSpec, Widget, WidgetSpec};
