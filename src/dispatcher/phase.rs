//! Dispatcher lifecycle

use serde::Serialize;

/// Lifecycle phase of a [`Dispatcher`](super::Dispatcher)
///
/// ```text
/// Idle ──start()──► Running ──shutdown() / source closed──► Draining ──► Stopped
/// ```
///
/// `Stopped` is terminal; a dispatcher is never restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatcherPhase {
    /// Created, not yet started
    Idle,
    /// Ingesting frames and accepting subscribers
    Running,
    /// Ingestion stopping, subscribers being closed
    Draining,
    Stopped,
}

impl DispatcherPhase {
    pub fn is_running(self) -> bool {
        self == DispatcherPhase::Running
    }

    /// Draining or Stopped
    pub fn is_terminating(self) -> bool {
        matches!(self, DispatcherPhase::Draining | DispatcherPhase::Stopped)
    }
}

impl std::fmt::Display for DispatcherPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatcherPhase::Idle => write!(f, "idle"),
            DispatcherPhase::Running => write!(f, "running"),
            DispatcherPhase::Draining => write!(f, "draining"),
            DispatcherPhase::Stopped => write!(f, "stopped"),
        }
    }
}
