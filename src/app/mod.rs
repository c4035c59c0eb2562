pub mod feed;
pub mod state;
pub mod ui;

pub use feed::{FeedTick, LiveFeed};
pub use state::{DashboardApp, LiveState};
