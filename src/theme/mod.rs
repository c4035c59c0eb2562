pub mod binding;
pub mod preferences;
pub mod store;

#[cfg(test)]
mod tests;

pub use binding::{ChartBinding, Palette, SharedChart};
pub use preferences::{Preferences, DARK_MODE_KEY};
pub use store::{SubscriptionId, ThemeEvent, ThemeStore};
