//! Dispatcher statistics

pub mod metrics;

pub use metrics::{DispatchStats, DispatchStatsSnapshot};
