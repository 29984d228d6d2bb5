//! Driving port for the synthetic load generator.

use serde::{Deserialize, Serialize};

/// State reported after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Ticks are scheduled.
    Started,
    /// No further ticks will be scheduled.
    Stopped,
}

/// Point-in-time view of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSnapshot {
    /// Whether ticks are scheduled.
    pub running: bool,
    /// Fully successful ticks since the last start.
    pub count: u64,
}

/// Start/stop control and counters.
#[cfg_attr(test, mockall::automock)]
pub trait LoadControl: Send + Sync {
    /// Start when stopped, stop when running.
    fn toggle(&self) -> LoadStatus;

    /// Current run state and tick count.
    fn snapshot(&self) -> LoadSnapshot;
}
