//! Presentation side channel.
//!
//! The engine hands a [`Snapshot`] to an [`Observer`] at most once per
//! redraw interval. Observers must not block: the CLI's
//! [`ChannelObserver`] drops a snapshot rather than wait for the renderer.

use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use openpedal_calibration::RangeSnapshot;
use openpedal_pipeline::PedalPipeline;
use serde::Serialize;

use crate::stats::EngineStats;

/// State of one axis at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSnapshot {
    /// Axis label.
    pub label: String,
    /// Shaped percentage.
    pub percent: f32,
    /// Value last computed for the device.
    pub value: i32,
    /// Learned range, when range tracking is on.
    pub range: Option<RangeSnapshot>,
}

/// What a dashboard needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// One entry per axis, in configuration order.
    pub axes: Vec<AxisSnapshot>,
    /// Last raw frame text received.
    pub raw: Option<String>,
    /// Counters at snapshot time.
    pub stats: EngineStats,
}

impl Snapshot {
    pub(crate) fn capture(pipeline: &PedalPipeline, raw: Option<&str>, stats: EngineStats) -> Self {
        let axes = pipeline
            .axes()
            .iter()
            .zip(pipeline.output().axes())
            .map(|(axis, out)| AxisSnapshot {
                label: axis.label().to_string(),
                percent: axis.percent(),
                value: out.value,
                range: axis.range(),
            })
            .collect();

        Self {
            axes,
            raw: raw.map(str::to_owned),
            stats,
        }
    }
}

/// Receives snapshots from the loop thread.
pub trait Observer {
    /// Take one snapshot. Must return without waiting on another thread.
    fn observe(&mut self, snapshot: Snapshot);
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&mut self, _snapshot: Snapshot) {}
}

/// Forwards snapshots over a bounded channel, dropping them when it is full.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<Snapshot>,
    dropped: u64,
}

impl ChannelObserver {
    /// Observer sending on `sender`.
    pub fn new(sender: Sender<Snapshot>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Observer plus the receiving end of a channel holding `capacity`
    /// snapshots.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Snapshot>) {
        let (sender, receiver) = channel::bounded(capacity);
        (Self::new(sender), receiver)
    }

    /// Snapshots dropped because the renderer was behind or gone.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Observer for ChannelObserver {
    fn observe(&mut self, snapshot: Snapshot) {
        match self.sender.try_send(snapshot) {
            Ok(()) => {}
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => {
                self.dropped = self.dropped.saturating_add(1);
            }
        }
    }
}

/// Lets an action through at most once per interval.
#[derive(Debug, Clone, Copy)]
pub struct RedrawThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl RedrawThrottle {
    /// Throttle that accepts its first call immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True, and restarts the interval, when `interval` has passed since the
    /// last accepted call. The first call is always accepted.
    pub fn ready(&mut self, now: Instant) -> bool {
        let due = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpedal_config::PedalConfig;

    fn snapshot() -> Snapshot {
        Snapshot::capture(&PedalPipeline::new(&PedalConfig::default()), Some("[1, 2, 3]"), EngineStats::new())
    }

    #[test]
    fn test_throttle_interval() {
        let mut throttle = RedrawThrottle::new(Duration::from_millis(20));
        let t0 = Instant::now();

        assert!(throttle.ready(t0));
        assert!(!throttle.ready(t0 + Duration::from_millis(5)));
        assert!(!throttle.ready(t0 + Duration::from_millis(19)));
        assert!(throttle.ready(t0 + Duration::from_millis(20)));
        assert!(!throttle.ready(t0 + Duration::from_millis(30)));
    }

    #[test]
    fn test_capture_lists_axes_in_order() {
        let snap = snapshot();
        let labels: Vec<&str> = snap.axes.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["Clutch", "Gas", "Brake"]);
        assert_eq!(snap.raw.as_deref(), Some("[1, 2, 3]"));
        assert!(snap.axes.iter().all(|a| a.range.is_none()));
    }

    #[test]
    fn test_channel_observer_never_blocks() {
        let (mut observer, receiver) = ChannelObserver::bounded(1);

        observer.observe(snapshot());
        observer.observe(snapshot());
        observer.observe(snapshot());

        assert_eq!(receiver.try_iter().count(), 1);
        assert_eq!(observer.dropped(), 2);

        drop(receiver);
        observer.observe(snapshot());
        assert_eq!(observer.dropped(), 3);
    }
}
