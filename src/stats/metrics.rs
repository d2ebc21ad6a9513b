//! Statistics for the dispatcher

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::registry::{BroadcastReport, TopicKind};

/// Live dispatcher counters, updated by the ingest loop
#[derive(Debug)]
pub struct DispatchStats {
    started_at: Instant,
    frames_received: AtomicU64,
    frames_ignored: AtomicU64,
    heartbeats: AtomicU64,
    raw_gps_fixes: AtomicU64,
    envelopes_delivered: AtomicU64,
    envelopes_dropped: AtomicU64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            frames_received: AtomicU64::new(0),
            frames_ignored: AtomicU64::new(0),
            heartbeats: AtomicU64::new(0),
            raw_gps_fixes: AtomicU64::new(0),
            envelopes_delivered: AtomicU64::new(0),
            envelopes_dropped: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_frame(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Frame kind with no converter
    pub(crate) fn record_ignored(&self) {
        self.frames_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_broadcast(&self, topic: TopicKind, report: &BroadcastReport) {
        let counter = match topic {
            TopicKind::Heartbeat => &self.heartbeats,
            TopicKind::RawGps => &self.raw_gps_fixes,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        self.envelopes_delivered
            .fetch_add(report.delivered as u64, Ordering::Relaxed);
        self.envelopes_dropped
            .fetch_add(report.dropped as u64, Ordering::Relaxed);
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            uptime: self.started_at.elapsed(),
            frames_received: self.frames_received.load(Ordering::Relaxed),
            frames_ignored: self.frames_ignored.load(Ordering::Relaxed),
            heartbeats: self.heartbeats.load(Ordering::Relaxed),
            raw_gps_fixes: self.raw_gps_fixes.load(Ordering::Relaxed),
            envelopes_delivered: self.envelopes_delivered.load(Ordering::Relaxed),
            envelopes_dropped: self.envelopes_dropped.load(Ordering::Relaxed),
        }
    }
}

impl Default for DispatchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`DispatchStats`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStatsSnapshot {
    /// Time since the dispatcher was created
    pub uptime: Duration,
    pub frames_received: u64,
    /// Frames of a kind with no converter
    pub frames_ignored: u64,
    pub heartbeats: u64,
    pub raw_gps_fixes: u64,
    /// Envelopes handed to subscriber queues
    pub envelopes_delivered: u64,
    /// Envelopes lost to full subscriber queues
    pub envelopes_dropped: u64,
}

impl DispatchStatsSnapshot {
    /// Average ingest rate in frames per second
    pub fn frame_rate(&self) -> f64 {
        let secs = self.uptime.as_secs_f64();
        if secs > 0.0 {
            self.frames_received as f64 / secs
        } else {
            0.0
        }
    }

    /// Share of offered envelopes lost to backpressure, 0.0 to 1.0
    pub fn drop_ratio(&self) -> f64 {
        let offered = self.envelopes_delivered + self.envelopes_dropped;
        if offered > 0 {
            self.envelopes_dropped as f64 / offered as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let snapshot = DispatchStats::new().snapshot();
        assert_eq!(snapshot.frames_received, 0);
        assert_eq!(snapshot.frames_ignored, 0);
        assert_eq!(snapshot.heartbeats, 0);
        assert_eq!(snapshot.envelopes_dropped, 0);
        assert_eq!(snapshot.drop_ratio(), 0.0);
    }

    #[test]
    fn test_record_broadcast() {
        let stats = DispatchStats::new();
        stats.record_frame();
        stats.record_frame();
        stats.record_ignored();
        stats.record_broadcast(
            TopicKind::RawGps,
            &BroadcastReport {
                delivered: 3,
                dropped: 1,
                closed: 0,
            },
        );

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.frames_received, 2);
        assert_eq!(snapshot.frames_ignored, 1);
        assert_eq!(snapshot.raw_gps_fixes, 1);
        assert_eq!(snapshot.heartbeats, 0);
        assert_eq!(snapshot.envelopes_delivered, 3);
        assert_eq!(snapshot.envelopes_dropped, 1);
        assert_eq!(snapshot.drop_ratio(), 0.25);
    }

    #[test]
    fn test_frame_rate_zero_uptime() {
        let snapshot = DispatchStatsSnapshot {
            frames_received: 100,
            ..Default::default()
        };
        assert_eq!(snapshot.frame_rate(), 0.0);
    }

    #[test]
    fn test_frame_rate() {
        let snapshot = DispatchStatsSnapshot {
            uptime: Duration::from_secs(10),
            frames_received: 50,
            ..Default::default()
        };
        assert_eq!(snapshot.frame_rate(), 5.0);
    }
}
