//! Range tracker for a single axis.

use std::time::{Duration, Instant};

use openpedal_config::PedalConfig;
use tracing::debug;

use crate::range::{Extreme, RangeSnapshot, RangeState};
use crate::DEGENERATE_RANGE_PERCENT;

/// Converts one axis' raw scalar stream into a 0–100 percentage.
///
/// The range is created from the first finite sample and then widened by
/// [`RangeState::observe`]. There is no separate calibration phase.
#[derive(Debug, Clone)]
pub struct RangeTracker {
    axis: usize,
    debounce: Duration,
    state: Option<RangeState>,
}

impl RangeTracker {
    /// Create a tracker for axis `axis` using the configured debounce window.
    pub fn new(axis: usize, config: &PedalConfig) -> Self {
        Self::with_debounce(axis, config.debounce())
    }

    /// Create a tracker with an explicit debounce window.
    pub fn with_debounce(axis: usize, debounce: Duration) -> Self {
        Self {
            axis,
            debounce,
            state: None,
        }
    }

    /// Feed one raw value observed at `now`.
    ///
    /// Returns the normalized percentage, or `None` when `current` is not
    /// finite. A non-finite value leaves the range and timers untouched, and
    /// the caller holds the axis' previous output.
    pub fn update(&mut self, current: f32, now: Instant) -> Option<f32> {
        if !current.is_finite() {
            return None;
        }

        let Some(state) = self.state.as_mut() else {
            self.state = Some(RangeState::new(current));
            debug!(axis = self.axis, initial = current, "range initialized");
            return Some(DEGENERATE_RANGE_PERCENT);
        };

        if let Some(extreme) = state.observe(current, now, self.debounce) {
            match extreme {
                Extreme::Min => debug!(axis = self.axis, min = state.min(), "committed new minimum"),
                Extreme::Max => debug!(axis = self.axis, max = state.max(), "committed new maximum"),
            }
        }

        Some(state.normalize(current))
    }

    /// Axis index this tracker belongs to.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Learned range, once the first sample has arrived.
    pub fn state(&self) -> Option<&RangeState> {
        self.state.as_ref()
    }

    /// Learned bounds, once the first sample has arrived.
    pub fn snapshot(&self) -> Option<RangeSnapshot> {
        self.state.as_ref().map(RangeState::snapshot)
    }
}
