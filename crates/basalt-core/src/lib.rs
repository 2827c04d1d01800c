pub mod activity;
pub mod blocker;
pub mod hosts;
pub mod resources;
pub mod time_stats;
pub mod topk;
pub mod window;

pub use activity::PeriodActivity;
pub use blocker::BlockedHosts;
pub use hosts::{HostActivity, HostAxis};
pub use resources::{ResourceActivity, ResourceAxis};
pub use time_stats::TimeStats;
pub use topk::TopK;
pub use window::{WindowQueue, WindowTally};
