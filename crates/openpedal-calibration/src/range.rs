//! Per-axis learned range with pending-extreme timers.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::DEGENERATE_RANGE_PERCENT;

/// Which bound of the range moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// The learned minimum widened downwards.
    Min,
    /// The learned maximum widened upwards.
    Max,
}

/// Learned range of one axis.
///
/// `min <= max` holds from construction on: both start at the first sample
/// and only ever move outwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeState {
    min: f32,
    max: f32,
    min_pending_since: Option<Instant>,
    max_pending_since: Option<Instant>,
}

impl RangeState {
    /// Start a range at a single point.
    pub fn new(initial: f32) -> Self {
        Self {
            min: initial,
            max: initial,
            min_pending_since: None,
            max_pending_since: None,
        }
    }

    /// Learned minimum.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Learned maximum.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// When the current below-minimum excursion started, if any.
    pub fn min_pending_since(&self) -> Option<Instant> {
        self.min_pending_since
    }

    /// When the current above-maximum excursion started, if any.
    pub fn max_pending_since(&self) -> Option<Instant> {
        self.max_pending_since
    }

    /// Feed one value through both debounce timers.
    ///
    /// An excursion past a bound starts that bound's timer; once the
    /// excursion has lasted `debounce`, the bound moves to `current`. Any
    /// value back inside the bound cancels the timer. Returns the bound that
    /// moved this tick, if any.
    pub fn observe(&mut self, current: f32, now: Instant, debounce: Duration) -> Option<Extreme> {
        let mut moved = None;

        if current < self.min {
            match self.min_pending_since {
                None => self.min_pending_since = Some(now),
                Some(since) if now.saturating_duration_since(since) >= debounce => {
                    self.min = current;
                    self.min_pending_since = None;
                    moved = Some(Extreme::Min);
                }
                Some(_) => {}
            }
        } else {
            self.min_pending_since = None;
        }

        if current > self.max {
            match self.max_pending_since {
                None => self.max_pending_since = Some(now),
                Some(since) if now.saturating_duration_since(since) >= debounce => {
                    self.max = current;
                    self.max_pending_since = None;
                    moved = Some(Extreme::Max);
                }
                Some(_) => {}
            }
        } else {
            self.max_pending_since = None;
        }

        moved
    }

    /// Position of `current` inside the learned range, in percent.
    ///
    /// Clamped to `[0, 100]`; a zero-width range reports
    /// [`DEGENERATE_RANGE_PERCENT`].
    pub fn normalize(&self, current: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return DEGENERATE_RANGE_PERCENT;
        }
        (((current - self.min) / span) * 100.0).clamp(0.0, 100.0)
    }

    /// Copy of the bounds for presentation.
    pub fn snapshot(&self) -> RangeSnapshot {
        RangeSnapshot {
            min: self.min,
            max: self.max,
        }
    }
}

/// Bounds of a learned range, detached from its timers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSnapshot {
    /// Learned minimum.
    pub min: f32,
    /// Learned maximum.
    pub max: f32,
}

impl RangeSnapshot {
    /// Width of the range.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(1000);

    fn ms(t0: Instant, offset: u64) -> Instant {
        t0 + Duration::from_millis(offset)
    }

    #[test]
    fn test_single_spike_does_not_move_bounds() {
        let t0 = Instant::now();
        let mut range = RangeState::new(20.0);

        assert_eq!(range.observe(-50.0, ms(t0, 0), DEBOUNCE), None);
        assert_eq!(range.observe(20.0, ms(t0, 10), DEBOUNCE), None);
        assert_eq!(range.observe(-50.0, ms(t0, 2000), DEBOUNCE), None);

        assert!((range.min() - 20.0).abs() < f32::EPSILON);
        assert!(range.min_pending_since().is_some());
    }

    #[test]
    fn test_returning_inside_cancels_timer() {
        let t0 = Instant::now();
        let mut range = RangeState::new(20.0);

        range.observe(30.0, ms(t0, 0), DEBOUNCE);
        assert!(range.max_pending_since().is_some());

        range.observe(20.0, ms(t0, 500), DEBOUNCE);
        assert!(range.max_pending_since().is_none());

        // The timer restarts on the next excursion, so the old start no longer counts.
        range.observe(30.0, ms(t0, 1200), DEBOUNCE);
        assert!((range.max() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sustained_excursion_commits_latest_value() {
        let t0 = Instant::now();
        let mut range = RangeState::new(20.0);

        range.observe(35.0, ms(t0, 0), DEBOUNCE);
        range.observe(32.0, ms(t0, 400), DEBOUNCE);
        let moved = range.observe(31.0, ms(t0, 1000), DEBOUNCE);

        assert_eq!(moved, Some(Extreme::Max));
        assert!((range.max() - 31.0).abs() < f32::EPSILON);
        assert!(range.max_pending_since().is_none());
    }

    #[test]
    fn test_min_and_max_timers_are_independent() {
        let t0 = Instant::now();
        let mut range = RangeState::new(0.0);

        range.observe(-5.0, ms(t0, 0), DEBOUNCE);
        range.observe(5.0, ms(t0, 100), DEBOUNCE);

        // Going above max cancelled the pending min; the pending max is fresh.
        assert!(range.min_pending_since().is_none());
        assert_eq!(range.max_pending_since(), Some(ms(t0, 100)));
    }

    #[test]
    fn test_normalize_degenerate_is_full_scale() {
        let range = RangeState::new(7.5);
        assert!((range.normalize(7.5) - DEGENERATE_RANGE_PERCENT).abs() < f32::EPSILON);
        assert!((range.normalize(-100.0) - DEGENERATE_RANGE_PERCENT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_normalize_clamps_outside_values() {
        let t0 = Instant::now();
        let mut range = RangeState::new(0.0);
        range.observe(10.0, ms(t0, 0), Duration::ZERO);
        range.observe(10.0, ms(t0, 1), Duration::ZERO);

        assert!((range.max() - 10.0).abs() < f32::EPSILON);
        assert!(range.normalize(-3.0).abs() < f32::EPSILON);
        assert!((range.normalize(5.0) - 50.0).abs() < 1e-4);
        assert!((range.normalize(12.0) - 100.0).abs() < f32::EPSILON);
    }
}
